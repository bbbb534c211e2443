//! Help text for a schema document.
//!
//! Reads the declarations directly; the resolver is not involved.

use argspec_core::{ArgSpec, FlagSpec};

use crate::document::SchemaDocument;

/// Renders `Usage: BIN ...`, the description, the visible flags and the
/// document's extra help, each block followed by a newline.
pub fn render_help(bin: &str, doc: &SchemaDocument) -> String {
    let schema = doc.to_schema();
    let flags: Vec<&FlagSpec> = schema.flags.iter().filter(|f| !f.hidden).collect();

    let mut out = format!("Usage: {bin} {}\n", usage_line(doc));
    if let Some(description) = &doc.description {
        out.push_str(description.trim());
        out.push('\n');
    }
    if !flags.is_empty() {
        out.push_str(&render_flags(flags));
        out.push('\n');
    }
    if let Some(help) = &doc.help {
        out.push_str(help.trim());
        out.push('\n');
    }
    out
}

/// `topic[:command] ARG [OPTIONAL]`, unless the document overrides it.
pub fn usage_line(doc: &SchemaDocument) -> String {
    if let Some(usage) = &doc.usage {
        return usage.trim().to_string();
    }
    let command = match &doc.command {
        Some(command) => format!("{}:{command}", doc.topic),
        None => doc.topic.clone(),
    };
    let args: Vec<String> = doc.args.iter().map(render_arg).collect();
    format!("{command} {}", args.join(" ")).trim().to_string()
}

fn render_arg(arg: &ArgSpec) -> String {
    let name = arg.name.to_uppercase();
    if arg.is_required() {
        name
    } else {
        format!("[{name}]")
    }
}

fn render_flags(mut flags: Vec<&FlagSpec>) -> String {
    // Flags with a short alias first, then by name.
    flags.sort_by(|a, b| {
        b.short
            .is_some()
            .cmp(&a.short.is_some())
            .then_with(|| a.name.cmp(&b.name))
    });

    let items: Vec<(String, String)> = flags
        .into_iter()
        .map(|flag| {
            let mut label = match flag.short {
                Some(short) => format!("-{short}, --{}", flag.name),
                None => format!("--{}", flag.name),
            };
            if flag.consumes_value() {
                label.push(' ');
                label.push_str(&flag.name.to_uppercase());
            }
            let mut description = flag.description.clone().unwrap_or_default();
            if flag.is_required() {
                description = format!("(required) {description}");
            }
            (label, description)
        })
        .collect();

    render_list(&items)
}

fn render_list(items: &[(String, String)]) -> String {
    // Padding counts chars, so measure labels the same way.
    let width = items
        .iter()
        .map(|(left, _)| left.chars().count())
        .max()
        .unwrap_or(0)
        + 1;
    items
        .iter()
        .map(|(left, right)| {
            let left = format!(" {left}");
            if right.trim().is_empty() {
                left
            } else {
                format!("{left:<width$} # {}", right.trim())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
