// Tue Jan 25 2026 - Alex

use crate::model::{Constructor, Modifiers, Parameter, Statement, WrapperField, WrapperMethod, WrapperType};
use crate::output::{package_path, write_file, EmitError, Emitter};
use std::path::{Path, PathBuf};

/// Renders wrapper models as Java source.
#[derive(Debug, Clone)]
pub struct SourceRenderer {
    indent: String,
    header: Option<String>,
}

impl SourceRenderer {
    pub fn new() -> Self {
        Self {
            indent: "    ".to_string(),
            header: None,
        }
    }

    /// Comment placed above the package declaration.
    pub fn with_header(mut self, header: &str) -> Self {
        self.header = Some(header.to_string());
        self
    }

    pub fn render(&self, model: &WrapperType) -> String {
        let mut code = String::new();

        if let Some(header) = &self.header {
            for line in header.lines() {
                code.push_str(&format!("// {}\n", line));
            }
        }
        if !model.package.is_empty() {
            code.push_str(&format!("package {};\n\n", model.package));
        }

        if !model.imports.is_empty() {
            let mut imports: Vec<&String> = model.imports.iter().collect();
            imports.sort();
            for import in imports {
                code.push_str(&format!("import {};\n", import));
            }
            code.push('\n');
        }

        code.push_str(&with_modifiers(&model.modifiers, &format!("class {}", model.name)));
        if let Some(supertype) = &model.supertype {
            code.push_str(&format!(" extends {}", supertype.simple_name()));
        }
        code.push_str(" {\n");

        let mut sections: Vec<String> = Vec::new();
        if !model.fields.is_empty() {
            sections.push(model.fields.iter().map(|f| self.render_field(f)).collect());
        }
        if let Some(constructor) = &model.constructor {
            sections.push(self.render_constructor(&model.name, constructor));
        }
        sections.extend(model.methods.iter().map(|m| self.render_method(m)));
        code.push_str(&sections.join("\n"));

        code.push_str("}\n");
        code
    }

    fn render_field(&self, field: &WrapperField) -> String {
        let declaration = with_modifiers(&field.modifiers, &format!("{} {}", field.ty.simple_name(), field.name));
        match &field.initializer {
            Some(value) => format!("{}{} = {};\n", self.indent, declaration, value),
            None => format!("{}{};\n", self.indent, declaration),
        }
    }

    fn render_constructor(&self, owner: &str, constructor: &Constructor) -> String {
        let head = format!("{}({})", owner, param_list(&constructor.params));
        self.render_block(&with_modifiers(&constructor.modifiers, &head), &constructor.body)
    }

    fn render_method(&self, method: &WrapperMethod) -> String {
        let head = format!(
            "{} {}({})",
            method.returns.simple_name(),
            method.name,
            param_list(&method.params)
        );
        self.render_block(&with_modifiers(&method.modifiers, &head), &method.body)
    }

    fn render_block(&self, head: &str, body: &[Statement]) -> String {
        if body.is_empty() {
            return format!("{}{} {{}}\n", self.indent, head);
        }
        let mut code = format!("{}{} {{\n", self.indent, head);
        for statement in body {
            code.push_str(&format!("{}{}{}\n", self.indent, self.indent, statement));
        }
        code.push_str(&format!("{}}}\n", self.indent));
        code
    }
}

impl Default for SourceRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn with_modifiers(modifiers: &Modifiers, rest: &str) -> String {
    let keywords = modifiers.to_string();
    if keywords.is_empty() {
        rest.to_string()
    } else {
        format!("{} {}", keywords, rest)
    }
}

fn param_list(params: &[Parameter]) -> String {
    params.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Writes `.java` files under a package directory tree.
pub struct SourceEmitter {
    root: PathBuf,
    renderer: SourceRenderer,
}

impl SourceEmitter {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            renderer: SourceRenderer::new(),
        }
    }

    pub fn with_renderer(mut self, renderer: SourceRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Emitter for SourceEmitter {
    fn name(&self) -> &'static str {
        "source"
    }

    fn emit(&self, model: &WrapperType) -> Result<Option<PathBuf>, EmitError> {
        let path = package_path(&self.root, model, "java");
        write_file(&path, &self.renderer.render(model))?;
        log::trace!("Wrote {}", path.display());
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Expr, TypeRef};
    use crate::structure::PrimitiveType;

    #[test]
    fn test_render_class() {
        let mut model = WrapperType::new("win32.mapped.struct", "RECTL", Modifiers::public());
        model.set_supertype(TypeRef::named("win32.mapped.struct", "RECT"));
        model
            .set_constructor(
                Constructor::new(Modifiers::public())
                    .with_param(Parameter::new("segment", TypeRef::Segment))
                    .with_statement(Statement::Expr(Expr::bare_call("super", vec![Expr::ident("segment")]))),
            )
            .unwrap();
        model
            .add_method(
                WrapperMethod::new("sizeof", Modifiers::public().with_static(), TypeRef::Primitive(PrimitiveType::Long))
                    .with_statement(Statement::Return(Expr::literal("16L"))),
            )
            .unwrap();

        let expected = "\
package win32.mapped.struct;

import jdk.incubator.foreign.MemorySegment;

public class RECTL extends RECT {
    public RECTL(MemorySegment segment) {
        super(segment);
    }

    public static long sizeof() {
        return 16L;
    }
}
";
        assert_eq!(SourceRenderer::new().render(&model), expected);
    }

    #[test]
    fn test_render_fields_and_empty_constructor() {
        let int = TypeRef::Primitive(PrimitiveType::Int);
        let mut model = WrapperType::new("win32.mapped", "WindowMessages", Modifiers::public().with_final());
        model
            .add_field(
                WrapperField::new("WM_PAINT", int.clone(), Modifiers::public().with_static().with_final())
                    .with_initializer(Expr::cast(int, Expr::literal(15))),
            )
            .unwrap();
        model.set_constructor(Constructor::new(Modifiers::private())).unwrap();

        let rendered = SourceRenderer::new().with_header("generated").render(&model);
        assert!(rendered.starts_with("// generated\npackage win32.mapped;\n\npublic final class WindowMessages {\n"));
        assert!(rendered.contains("    public static final int WM_PAINT = (int)15;\n"));
        assert!(rendered.contains("    private WindowMessages() {}\n"));
    }
}
