//! Go source emission.

use std::io::Write;

use gormgen_core::GoType;
use gormgen_schema::Table;
use log::debug;

use crate::{
    Diagnostic, GenerationConfig, GenerationError,
    builder::CodeBuilder,
    error::Result,
    go,
    plan::{FieldPlan, Hook, StructPlan, TABLE_NAME_METHOD, plan_tables},
};

/// First line of every emitted file, in the form Go tooling recognises.
pub const GENERATED_HEADER: &str = "// Code generated by gormgen. DO NOT EDIT.";

/// Writes one Go struct per table.
///
/// Every table is resolved before the first byte is written, then the file
/// preamble and each struct are written to the sink in turn.
///
/// ```
/// use gormgen_codegen::{GenerationConfig, StructEmitter};
/// use gormgen_schema::{Column, Table};
///
/// let tables = vec![Table::new("t_user").column(Column::new("id", "int(11)"))];
/// let emitter = StructEmitter::new(GenerationConfig::new("models").strip_prefixes(["t_"]));
///
/// let (code, report) = emitter.emit_to_string(&tables).unwrap();
/// assert!(code.contains("type User struct {"));
/// assert_eq!(report.structs[0].name, "User");
/// ```
#[derive(Debug, Clone)]
pub struct StructEmitter {
    config: GenerationConfig,
}

impl StructEmitter {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Emit a Go file for `tables` into `out`.
    ///
    /// Fails before writing anything on naming problems. A failed write is
    /// returned as [`GenerationError::WriteFailure`]; the sink may then hold
    /// partial output.
    pub fn emit<W: Write + ?Sized>(&self, tables: &[Table], out: &mut W) -> Result<EmitReport> {
        let package = self.config.package_name.trim();
        if package.is_empty() {
            return Err(GenerationError::MissingPackageName);
        }
        if !go::is_identifier(package) {
            return Err(GenerationError::InvalidPackageName {
                name: package.to_string(),
            });
        }

        let plan = plan_tables(tables, &self.config)?;

        let mut preamble = CodeBuilder::go();
        preamble
            .push_line(GENERATED_HEADER)
            .push_blank()
            .push_line(&format!("package {}", package));
        let imports = plan.imports();
        if !imports.is_empty() {
            preamble.push_blank();
            imports.render(&mut preamble);
        }
        out.write_all(preamble.as_str().as_bytes())?;

        for item in &plan.structs {
            let mut builder = CodeBuilder::go();
            render_struct(item, &mut builder);
            out.write_all(builder.as_str().as_bytes())?;
            debug!("wrote struct {}", item.name);
        }
        out.flush()?;

        Ok(EmitReport {
            structs: plan.structs.iter().map(EmittedStruct::from).collect(),
            skipped: plan.skipped,
            diagnostics: plan.diagnostics,
        })
    }

    /// Emit into a string.
    pub fn emit_to_string(&self, tables: &[Table]) -> Result<(String, EmitReport)> {
        let mut buffer = Vec::new();
        let report = self.emit(tables, &mut buffer)?;
        // Every fragment written above is a `str`.
        let code = String::from_utf8_lossy(&buffer).into_owned();
        Ok((code, report))
    }
}

fn render_struct(plan: &StructPlan<'_>, builder: &mut CodeBuilder) {
    let table = plan.table;
    let comment = go::comment_text(&table.comment);

    builder.push_blank();
    if comment.is_empty() {
        builder.push_comment(&format!("{} -> {}", plan.name, table.name));
    } else {
        builder.push_comment(&format!("{} -> {}: {}", plan.name, table.name, comment));
    }
    builder.push_block(&format!("type {} struct {{", plan.name), "}", |b| {
        for field in &plan.fields {
            b.push_line(&field_line(field));
        }
    });

    builder.push_blank().push_block(
        &format!("func ({}) {}() string {{", plan.name, TABLE_NAME_METHOD),
        "}",
        |b| {
            b.push_line(&format!("return {}", go::string_literal(&table.name)));
        },
    );

    for hook in &plan.hooks {
        render_hook(&plan.name, hook, builder);
    }
}

fn field_line(field: &FieldPlan<'_>) -> String {
    let mut line = format!("{} {}", field.name, field.go_type);
    if let Some(tag) = &field.tag {
        line.push(' ');
        line.push_str(&go::tag_literal(tag));
    }
    let comment = go::comment_text(&field.column.comment);
    if !comment.is_empty() {
        line.push_str(" // ");
        line.push_str(&comment);
    }
    line
}

fn render_hook(struct_name: &str, hook: &Hook, builder: &mut CodeBuilder) {
    let field = hook.kind.field();
    let now = match hook.go_type {
        GoType::Int64 => "time.Now().Unix()".to_string(),
        other => format!("{}(time.Now().Unix())", other),
    };

    builder.push_blank().push_block(
        &format!(
            "func (i *{}) {}(scope *gorm.Scope) error {{",
            struct_name,
            hook.kind.method()
        ),
        "}",
        |b| {
            b.push_line(&format!("i.{} = {}", field, now))
                .push_line(&format!("return scope.SetColumn(\"{}\", i.{})", field, field));
        },
    );
}

/// Outcome of a successful [`StructEmitter::emit`].
#[derive(Debug, Clone, Default)]
pub struct EmitReport {
    /// Structs written, in output order.
    pub structs: Vec<EmittedStruct>,
    /// Raw names of tables rejected by the name filter.
    pub skipped: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl EmitReport {
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_warning())
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }
}

/// Summary of one emitted struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedStruct {
    /// Raw table name.
    pub table: String,
    /// Go struct name.
    pub name: String,
    pub field_count: usize,
    /// Names of the hook methods emitted for the struct.
    pub hooks: Vec<&'static str>,
}

impl From<&StructPlan<'_>> for EmittedStruct {
    fn from(plan: &StructPlan<'_>) -> Self {
        Self {
            table: plan.table.name.clone(),
            name: plan.name.clone(),
            field_count: plan.fields.len(),
            hooks: plan.hooks.iter().map(|h| h.kind.method()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use gormgen_schema::Column;

    use super::*;

    fn emit(tables: &[Table], config: GenerationConfig) -> String {
        StructEmitter::new(config).emit_to_string(tables).unwrap().0
    }

    #[test]
    fn test_empty_schema() {
        let code = emit(&[], GenerationConfig::new("models"));
        assert_eq!(code, format!("{}\n\npackage models\n", GENERATED_HEADER));
    }

    #[test]
    fn test_missing_package_name() {
        let err = StructEmitter::new(GenerationConfig::default())
            .emit_to_string(&[])
            .unwrap_err();
        assert!(matches!(err, GenerationError::MissingPackageName));
    }

    #[test]
    fn test_invalid_package_name_writes_nothing() {
        let mut out = Vec::new();
        let err = StructEmitter::new(GenerationConfig::new("my-pkg"))
            .emit(&[Table::new("user")], &mut out)
            .unwrap_err();
        assert!(matches!(err, GenerationError::InvalidPackageName { ref name } if name == "my-pkg"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_package_name_is_trimmed() {
        let code = emit(&[], GenerationConfig::new(" models "));
        assert!(code.ends_with("package models\n"));
    }

    #[test]
    fn test_table_name_column_is_rejected() {
        let tables = [Table::new("t_audit").column(Column::new("table_name", "varchar(64)"))];
        let mut out = Vec::new();
        let result = StructEmitter::new(GenerationConfig::new("models")).emit(&tables, &mut out);

        assert!(matches!(result, Err(GenerationError::MethodCollision { .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_table_gives_empty_struct() {
        let code = emit(&[Table::new("audit")], GenerationConfig::new("models"));
        assert!(code.contains("type Audit struct {\n}\n"));
        assert!(code.contains("func (Audit) TableName() string {\n\treturn \"audit\"\n}\n"));
    }

    #[test]
    fn test_field_line_without_tags() {
        let table = Table::new("user").column(Column::new("name", "varchar(32)").comment("nick"));
        let code = emit(&[table], GenerationConfig::new("models").no_tags());
        assert!(code.contains("\tName string // nick\n"));
        assert!(!code.contains('`'));
    }

    #[test]
    fn test_multiline_comments_are_flattened() {
        let table = Table::new("user")
            .comment("first\nsecond")
            .column(Column::new("name", "varchar(32)").comment("a\r\nb"));
        let code = emit(&[table], GenerationConfig::new("models").no_tags());
        assert!(code.contains("// User -> user: first second\n"));
        assert!(code.contains("\tName string // a b\n"));
    }

    #[test]
    fn test_backtick_in_column_name_uses_quoted_tag() {
        let table = Table::new("user").column(Column::new("we`ird", "int"));
        let config = GenerationConfig::new("models")
            .persistence_tags(false)
            .json_tag(true);
        let code = emit(&[table], config);
        assert!(code.contains("\tWeIrd int \"json:\\\"we`ird,omitempty\\\"\"\n"));
    }

    #[test]
    fn test_int_hook_converts() {
        let table = Table::new("post").column(Column::new("update_at", "int(11)"));
        let code = emit(&[table], GenerationConfig::new("models"));
        assert!(code.contains("\ti.UpdateAt = int(time.Now().Unix())\n"));
        assert!(code.contains("func (i *Post) BeforeUpdate(scope *gorm.Scope) error {"));
    }

    #[test]
    fn test_write_failure() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let err = StructEmitter::new(GenerationConfig::new("models"))
            .emit(&[Table::new("user")], &mut Broken)
            .unwrap_err();
        assert!(matches!(err, GenerationError::WriteFailure(_)));
    }

    #[test]
    fn test_collision_writes_nothing() {
        let tables = [Table::new("user").columns([
            Column::new("user_id", "int"),
            Column::new("userID", "int"),
        ])];
        let mut out = Vec::new();
        let result = StructEmitter::new(GenerationConfig::new("models")).emit(&tables, &mut out);

        assert!(matches!(
            result,
            Err(GenerationError::IdentifierCollision { .. })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_report() {
        let tables = [
            Table::new("t_user").columns([
                Column::new("id", "int"),
                Column::new("create_at", "bigint"),
                Column::new("extra", "json"),
            ]),
            Table::new("log"),
        ];
        let config = GenerationConfig::new("models")
            .strip_prefixes(["t_"])
            .filter_prefixes(["t_"]);
        let (_, report) = StructEmitter::new(config).emit_to_string(&tables).unwrap();

        assert_eq!(
            report.structs,
            [EmittedStruct {
                table: "t_user".to_string(),
                name: "User".to_string(),
                field_count: 3,
                hooks: vec!["BeforeCreate"],
            }]
        );
        assert_eq!(report.skipped, ["log"]);
        assert!(report.has_warnings());
        assert_eq!(report.warnings().count(), 1);
    }
}
