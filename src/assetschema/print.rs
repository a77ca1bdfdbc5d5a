use assetschema::api::{
    CmdMessage, FieldSource, FormBucket, FormField, InheritedAttribute, MessageLevel,
    OrganizedForm,
};
use assetschema::commands::attributes::OwnAttribute;
use assetschema::model::{Category, GlobalAttribute};
use assetschema::store::SchemaState;
use colored::Colorize;
use std::collections::HashSet;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LABEL_WIDTH: usize = 32;
const REQUIRED_MARKER: &str = "*";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_tree(state: &SchemaState, max_depth: usize) {
    if state.categories.is_empty() {
        println!("No categories found.");
        return;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for root in state.roots() {
        print_branch(state, root, 0, max_depth, &mut seen);
    }

    let unreachable: Vec<&Category> = state
        .categories
        .iter()
        .filter(|c| !seen.contains(c.id.as_str()))
        .collect();
    if !unreachable.is_empty() {
        println!();
        println!("{}", "Unreachable (missing parent or cycle):".yellow());
        for category in unreachable {
            println!("  {} {}", category.name, category.id.dimmed());
        }
    }
}

fn print_branch<'a>(
    state: &'a SchemaState,
    category: &'a Category,
    depth: usize,
    max_depth: usize,
    seen: &mut HashSet<&'a str>,
) {
    if depth > max_depth || !seen.insert(category.id.as_str()) {
        return;
    }
    let own = category.system_attributes.len() + category.custom_attributes.len();
    println!(
        "{}{} {} {}",
        "  ".repeat(depth),
        category.name.bold(),
        category.id.dimmed(),
        format!("({} attributes)", own).dimmed()
    );
    for child in state.children_of(&category.id) {
        print_branch(state, child, depth + 1, max_depth, seen);
    }
}

pub(super) fn print_path(path: &[Category]) {
    if path.is_empty() {
        println!("Category not found.");
        return;
    }
    let names: Vec<String> = path.iter().map(|c| c.name.clone()).collect();
    println!("{}", names.join(" › "));
}

pub(super) fn print_own_attributes(own: &[OwnAttribute]) {
    if own.is_empty() {
        println!("No attributes found.");
        return;
    }
    for entry in own {
        let state = if entry.config.is_enabled {
            "on ".green()
        } else {
            "off".red()
        };
        let preferred = if entry.attribute.is_preferred { "★" } else { " " };
        println!(
            "{:>3}. {} {} {}{}  {}",
            entry.config.order,
            state,
            preferred,
            pad_to_width(&entry.attribute.label, LABEL_WIDTH),
            entry.attribute.id.dimmed(),
            entry.origin.to_string().dimmed()
        );
    }
}

pub(super) fn print_inherited(inherited: &[InheritedAttribute]) {
    if inherited.is_empty() {
        println!("Nothing inherited.");
        return;
    }
    for entry in inherited {
        println!(
            "{:>3}. {}{}  {}",
            entry.order,
            pad_to_width(&entry.attribute.label, LABEL_WIDTH),
            entry.source.to_string().dimmed(),
            format!("from {}", entry.parent_category_name).cyan()
        );
    }
}

pub(super) fn print_globals(globals: &[&GlobalAttribute]) {
    if globals.is_empty() {
        println!("No global attributes found.");
        return;
    }
    let mut current = None;
    for global in globals {
        if current != Some(global.section) {
            println!("{}", global.section.to_string().bold());
            current = Some(global.section);
        }
        let state = if global.is_enabled {
            "on ".green()
        } else {
            "off".red()
        };
        let required = if global.is_required { REQUIRED_MARKER } else { " " };
        println!(
            "  {} {}{}  {}",
            state,
            required,
            pad_to_width(&global.label, LABEL_WIDTH),
            global.id.dimmed()
        );
    }
}

pub(super) fn print_form(form: &OrganizedForm) {
    if form.is_empty() {
        println!("Nothing to show.");
        return;
    }
    for bucket in FormBucket::ALL {
        let fields = form.bucket(bucket);
        if fields.is_empty() {
            continue;
        }
        println!("{}", bucket.title().bold());
        for field in fields {
            print_field(field);
        }
        println!();
    }
}

fn print_field(field: &FormField) {
    let required = if field.is_required { REQUIRED_MARKER } else { " " };
    let units = field
        .units
        .as_deref()
        .map(|u| format!(" [{}]", u))
        .unwrap_or_default();
    let source = match &field.source {
        FieldSource::Inherited { .. } => field.source.to_string().cyan(),
        _ => field.source.to_string().dimmed(),
    };
    println!(
        "  {}{}  {}{}  {}",
        required.red(),
        pad_to_width(&field.label, LABEL_WIDTH),
        field.kind.to_string().dimmed(),
        units,
        source
    );
}

fn pad_to_width(s: &str, width: usize) -> String {
    let truncated = truncate_to_width(s, width);
    let padding = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
