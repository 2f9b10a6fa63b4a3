//! Resolving tables into struct plans before any output is written.
//!
//! Every name and type decision is made here, so collisions surface as errors
//! while the output sink is still untouched.

use gormgen_core::{GoType, map_type, normalize};
use gormgen_schema::{Column, Table};
use indexmap::IndexMap;
use log::{debug, info, warn};

use crate::{
    Diagnostic, GenerationConfig, GenerationError,
    builder::ImportCollector,
    error::Result,
    tags::struct_tag,
};

/// Import path of the gorm v1 package used by lifecycle hooks.
pub const GORM_IMPORT: &str = "github.com/jinzhu/gorm";

/// Accessor emitted on every struct, returning the raw table name.
pub const TABLE_NAME_METHOD: &str = "TableName";

/// A table resolved into everything needed to render its struct.
#[derive(Debug, Clone)]
pub struct StructPlan<'a> {
    pub table: &'a Table,
    /// Exported struct name.
    pub name: String,
    pub fields: Vec<FieldPlan<'a>>,
    pub hooks: Vec<Hook>,
}

/// A column resolved into a struct field.
#[derive(Debug, Clone)]
pub struct FieldPlan<'a> {
    pub column: &'a Column,
    pub name: String,
    pub go_type: GoType,
    /// Tag content without the surrounding literal delimiters.
    pub tag: Option<String>,
}

/// Lifecycle events that get a timestamp hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    BeforeCreate,
    BeforeUpdate,
}

impl HookKind {
    /// Go method name of the hook.
    pub fn method(&self) -> &'static str {
        match self {
            HookKind::BeforeCreate => "BeforeCreate",
            HookKind::BeforeUpdate => "BeforeUpdate",
        }
    }

    /// Field name that triggers this hook.
    pub fn field(&self) -> &'static str {
        match self {
            HookKind::BeforeCreate => "CreateAt",
            HookKind::BeforeUpdate => "UpdateAt",
        }
    }
}

/// A timestamp hook to emit for a struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hook {
    pub kind: HookKind,
    /// Type of the stamped field; `int` needs a conversion from `int64`.
    pub go_type: GoType,
}

impl StructPlan<'_> {
    /// Imports this struct needs.
    pub fn imports(&self) -> ImportCollector {
        let mut imports = ImportCollector::new();
        for path in self.fields.iter().filter_map(|f| f.go_type.import_path()) {
            imports.add(path);
        }
        if !self.hooks.is_empty() {
            imports.add("time");
            imports.add(GORM_IMPORT);
        }
        imports
    }
}

/// Plans for every table that passes the filter, in input order.
#[derive(Debug, Default)]
pub struct SchemaPlan<'a> {
    pub structs: Vec<StructPlan<'a>>,
    /// Raw names of tables rejected by the name filter.
    pub skipped: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl SchemaPlan<'_> {
    /// Imports needed by the whole file.
    pub fn imports(&self) -> ImportCollector {
        let mut imports = ImportCollector::new();
        for plan in &self.structs {
            imports.merge(&plan.imports());
        }
        imports
    }
}

/// Resolve all tables, rejecting name collisions across and within tables.
pub fn plan_tables<'a>(tables: &'a [Table], config: &GenerationConfig) -> Result<SchemaPlan<'a>> {
    let filter = config.table_filter();
    let mut schema = SchemaPlan::default();
    let mut struct_names: IndexMap<String, &str> = IndexMap::new();

    for table in tables {
        if !filter.matches(&table.name) {
            debug!("skipping table {}", table.name);
            schema.skipped.push(table.name.clone());
            continue;
        }

        let plan = plan_table(table, config, &mut schema.diagnostics)?;
        if let Some(first) = struct_names.insert(plan.name.clone(), &table.name) {
            return Err(GenerationError::TypeNameCollision {
                first: first.to_string(),
                second: table.name.clone(),
                identifier: plan.name,
            });
        }
        schema.structs.push(plan);
    }

    Ok(schema)
}

/// Resolve one table into a struct plan.
pub fn plan_table<'a>(
    table: &'a Table,
    config: &GenerationConfig,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<StructPlan<'a>> {
    let name = normalize(config.struct_source_name(&table.name));
    if name.is_empty() {
        return Err(GenerationError::InvalidIdentifier {
            table: table.name.clone(),
            raw: table.name.clone(),
        });
    }
    info!("{} -> {}: {}", table.name, name, table.comment);

    if !table.has_columns() {
        info!("table {} has no columns", table.name);
        diagnostics.push(Diagnostic::info(
            &table.name,
            "table has no columns; emitted an empty struct",
        ));
    }

    let mut seen: IndexMap<String, &str> = IndexMap::new();
    let mut fields = Vec::with_capacity(table.columns.len());

    for column in &table.columns {
        let field = plan_field(column, config);
        if field.name.is_empty() {
            return Err(GenerationError::InvalidIdentifier {
                table: table.name.clone(),
                raw: column.name.clone(),
            });
        }
        if let Some(first) = seen.insert(field.name.clone(), &column.name) {
            return Err(GenerationError::IdentifierCollision {
                table: table.name.clone(),
                first: first.to_string(),
                second: column.name.clone(),
                identifier: field.name,
            });
        }
        if !field.go_type.is_mapped() {
            warn!(
                "{}.{}: unmapped type '{}', using {}",
                table.name, column.name, column.raw_type, field.go_type
            );
            diagnostics.push(
                Diagnostic::warning(
                    &table.name,
                    format!(
                        "unmapped type '{}' emitted as {}",
                        column.raw_type, field.go_type
                    ),
                )
                .at(&column.name),
            );
        }
        debug!(
            "  {} {} -> {} {}",
            column.name, column.raw_type, field.name, field.go_type
        );
        fields.push(field);
    }

    let hooks = lifecycle_hooks(&fields);
    check_method_names(table, &fields, &hooks)?;
    Ok(StructPlan {
        table,
        name,
        fields,
        hooks,
    })
}

fn plan_field<'a>(column: &'a Column, config: &GenerationConfig) -> FieldPlan<'a> {
    FieldPlan {
        column,
        name: normalize(&column.name),
        go_type: map_type(&column.raw_type),
        tag: struct_tag(column, config),
    }
}

/// Go rejects a field and a method with the same name on one type.
fn check_method_names(table: &Table, fields: &[FieldPlan<'_>], hooks: &[Hook]) -> Result<()> {
    let methods = std::iter::once(TABLE_NAME_METHOD).chain(hooks.iter().map(|h| h.kind.method()));
    for method in methods {
        if let Some(field) = fields.iter().find(|f| f.name == method) {
            return Err(GenerationError::MethodCollision {
                table: table.name.clone(),
                column: field.column.name.clone(),
                identifier: field.name.clone(),
            });
        }
    }
    Ok(())
}

/// `CreateAt`/`UpdateAt` integer fields get a hook stamping the Unix time.
fn lifecycle_hooks(fields: &[FieldPlan<'_>]) -> Vec<Hook> {
    [HookKind::BeforeCreate, HookKind::BeforeUpdate]
        .into_iter()
        .filter_map(|kind| {
            fields
                .iter()
                .find(|f| f.name == kind.field())
                .filter(|f| matches!(f.go_type, GoType::Int64 | GoType::Int))
                .map(|f| Hook {
                    kind,
                    go_type: f.go_type,
                })
        })
        .collect()
}
