// Descriptor emission
//
// Pure formatting over a finished package graph. Four descriptors drive
// the downstream build: the package rule makefile, the native source
// list, the Kconfig package toggles and the flat dependency index. A
// fifth, the addgolib registration fragment, mirrors the rule makefile
// in assignment form.

use crate::graph::PackageGraph;
use crate::resolve::ResolvedSource;

/// Trailer of the rule makefile: tie object cleanup to the export files
const RULES_FOOTER: &str = "\nLIBGO_CLEAN += $(LIBGO_OBJS-y) $(LIBGO_OBJS-y:.o=.gox)\n";

/// Upper-case a package path into a make/Kconfig identifier
/// ("unicode/utf8" -> "UNICODE_UTF8")
pub fn path_ident(path: &str) -> String {
    path.replace(['.', '/', '-'], "_").to_uppercase()
}

/// Kconfig option name for a package object ("bufio.o" -> "LIBGO_PKG_BUFIO")
pub fn config_option(object: &str) -> String {
    let name = object.strip_suffix(".o").unwrap_or(object);
    format!("LIBGO_PKG_{}", path_ident(name))
}

fn header(version: &str, tool: &str) -> String {
    format!(
        "# This file has been auto-generated for {version}.\n\
         # To re-generate navigate to Unikraft application folder\n\
         #   $ make prepare\n\
         #   $ cd build/libgo/origin\n\
         #   $ mkdir gccbuild\n\
         #   $ cd gccbuild\n\
         #   $ ../gcc-<GCC_VERSION>/configure --disable-multilib --enable-languages=c,c++,go\n\
         #   $ make V=1 -j`nproc`| tee build.log\n\
         #   $ {tool}\n\
         #\n"
    )
}

fn source_reference(source: &ResolvedSource) -> String {
    match source {
        ResolvedSource::Extracted(path) => format!("$(LIBGO_EXTRACTED)/{path}"),
        ResolvedSource::Generated(name) => format!("$(LIBGO_BASE)/generated/{name}"),
    }
}

fn build_command(flags: &[String]) -> String {
    let flags: String = flags.iter().map(|f| format!("{f} ")).collect();
    format!(
        "\n\t$(call verbose_cmd,GO,libgo: $(notdir $@), cd $(LIBGO_EXTRACTED) && \\\n\
         \tmkdir -p $(dir $@) && \\\n\
         \t$(GOC) $(LIBGO_GOFLAGS) -c {flags}-fgo-pkgpath=$(subst $(LIBGO_BUILD)/,,$(@:.o=)) $(filter %.go,$^) -o $@ && \\\n\
         \tobjcopy -j .go_export $@ $(@:.o=.gox))\n"
    )
}

/// The package rule makefile: one build stanza per unit, followed by the
/// aggregate object list gated on each package's Kconfig option.
pub fn emit_rules(graph: &PackageGraph, version: &str, tool: &str) -> String {
    let mut out = header(version, tool);

    for unit in &graph.units {
        out.push_str(&format!("$(LIBGO_BUILD)/{}:", unit.object));
        for source in &unit.sources {
            out.push(' ');
            out.push_str(&source_reference(source));
        }
        for dep in &unit.deps {
            out.push_str(&format!(" $(LIBGO_BUILD)/{dep}"));
        }
        out.push_str(&build_command(&unit.flags));
    }

    out.push('\n');
    for unit in &graph.units {
        out.push_str(&format!(
            "LIBGO_OBJS-$(CONFIG_{}) += $(LIBGO_BUILD)/{}\n",
            config_option(&unit.object),
            unit.object
        ));
    }
    out.push_str(RULES_FOOTER);
    out
}

/// The flat native source list, sorted, one path per line
pub fn emit_sources(graph: &PackageGraph) -> String {
    let mut out = String::new();
    for path in graph.sorted_native_sources() {
        out.push_str(&format!("LIBGO_SRCS-y += $(LIBGO_EXTRACTED)/{path}\n"));
    }
    out
}

/// The Kconfig package toggles. Each package selects the toggles of its
/// direct dependencies, so enabling a package enables its prerequisites
/// transitively through Kconfig's own select propagation.
pub fn emit_config(graph: &PackageGraph) -> String {
    let mut units: Vec<_> = graph.units.iter().collect();
    units.sort_by(|a, b| a.object.cmp(&b.object));

    let mut out = String::new();
    for unit in units {
        out.push_str(&format!(
            "\nconfig {}\n\tbool \"{}\"\n\tdefault n\n",
            config_option(&unit.object),
            unit.name()
        ));
        for dep in &unit.deps {
            out.push_str(&format!("\tselect {}\n", config_option(dep)));
        }
    }
    out
}

/// The plain dependency index: one line per unit, object suffixes
/// stripped, sorted by package name
pub fn emit_index(graph: &PackageGraph) -> String {
    let mut out = String::new();
    for (name, deps) in graph.dependency_index() {
        out.push_str(name);
        for dep in deps {
            out.push(' ');
            out.push_str(dep);
        }
        out.push('\n');
    }
    out
}

/// The registration fragment: the rule makefile's content in assignment
/// form, one addgolib call per unit with SRCS/DEPS/FLAGS lines
pub fn emit_runtime(graph: &PackageGraph, version: &str, tool: &str) -> String {
    let mut out = header(version, tool);
    for unit in &graph.units {
        out.push_str(&format!("$(eval $(call addgolib,{}))\n", unit.name()));
        let prefix = path_ident(unit.name());
        for source in &unit.sources {
            out.push_str(&format!("{prefix}_SRCS += {}\n", source_reference(source)));
        }
        for dep in &unit.deps {
            let dep_name = dep.strip_suffix(".o").unwrap_or(dep);
            out.push_str(&format!("{prefix}_DEPS += {dep_name}\n"));
        }
        for flag in &unit.flags {
            out.push_str(&format!("{prefix}_FLAGS += {flag}\n"));
        }
    }
    out
}
