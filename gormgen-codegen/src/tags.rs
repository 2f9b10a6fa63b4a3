//! Struct tag assembly.

use gormgen_schema::Column;

use crate::{GenerationConfig, go};

/// Build the tag content for a column, or `None` when no tag is enabled.
///
/// Pairs appear in a fixed order: gorm, json, toml, yaml, xml.
pub fn struct_tag(column: &Column, config: &GenerationConfig) -> Option<String> {
    let name = go::tag_value(&column.name);
    let mut pairs = Vec::new();

    if config.emit_persistence_tags {
        pairs.push(format!("gorm:\"{}\"", gorm_settings(column, config)));
    }
    if config.emit_json_tag {
        pairs.push(format!("json:\"{},omitempty\"", name));
    }
    if config.emit_toml_tag {
        pairs.push(format!("toml:\"{}\"", name));
    }
    if config.emit_yaml_tag {
        pairs.push(format!("yaml:\"{}\"", name));
    }
    if config.emit_xml_tag {
        pairs.push(format!("xml:\"{}\"", name));
    }

    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join(" "))
    }
}

/// The `;`-terminated settings inside a gorm tag.
fn gorm_settings(column: &Column, config: &GenerationConfig) -> String {
    let mut settings = format!("column:{};", go::tag_value(&column.name));
    if column.primary_key {
        settings.push_str("primary_key;");
    }
    if column.auto_increment {
        settings.push_str("auto_increment;");
    }
    if config.emit_type_in_tag {
        settings.push_str(&format!("type:{};", go::tag_value(&column.raw_type)));
    }
    if config.emit_not_null_in_tag && !column.nullable {
        settings.push_str("not null;");
    }
    settings
}
