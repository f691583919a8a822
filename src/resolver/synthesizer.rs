// Tue Jan 22 2026 - Alex

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::model::{Constructor, Expr, Modifiers, Parameter, Statement, TypeRef, WrapperField, WrapperMethod, WrapperType};
use crate::resolver::{BaseImplementation, ResolverContext};
use crate::structure::{GroupLayout, LayoutMember, PrimitiveType};
use crate::utils::naming::sanitize_identifier;

const SEGMENT: &str = "segment";
const VALUE_LAYOUT: &str = "ValueLayout";
const VALUE_LAYOUT_IMPORT: &str = "jdk.incubator.foreign.ValueLayout";

/// Builds struct wrapper models from memory layouts.
pub struct StructSynthesizer {
    package: String,
}

impl StructSynthesizer {
    pub fn new(package: &str) -> Self {
        Self {
            package: package.to_string(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn type_ref(&self, native: &str) -> TypeRef {
        TypeRef::named(&self.package, native)
    }

    /// Wrapper for a new base implementation: segment field, constructor,
    /// size and allocation helpers, and accessors for every leaf value.
    pub fn base_model(&self, native: &str, layout: &GroupLayout, diagnostics: &Diagnostics) -> WrapperType {
        let mut model = WrapperType::new(&self.package, native, Modifiers::public());
        let own_type = model.type_ref();

        add_field(
            &mut model,
            WrapperField::new(SEGMENT, TypeRef::Segment, Modifiers::public().with_final()),
            diagnostics,
        );

        let constructor = Constructor::new(Modifiers::public())
            .with_param(Parameter::new(SEGMENT, TypeRef::Segment))
            .with_statement(Statement::Assign {
                target: Expr::this_field(SEGMENT),
                value: Expr::ident(SEGMENT),
            });
        if let Err(e) = model.set_constructor(constructor) {
            diagnostics.report(DiagnosticKind::MemberConflict, native, e.to_string());
        }

        let sizeof = WrapperMethod::new("sizeof", Modifiers::public().with_static(), TypeRef::Primitive(PrimitiveType::Long))
            .with_statement(Statement::Return(long_literal(layout.byte_size())));
        add_method(&mut model, sizeof, diagnostics);

        let allocate = WrapperMethod::new("allocate", Modifiers::public().with_static(), own_type.clone())
            .with_param(Parameter::new("scope", TypeRef::Scope))
            .with_statement(Statement::Return(Expr::new_object(
                own_type,
                vec![Expr::static_call(
                    &TypeRef::Segment,
                    "allocateNative",
                    vec![Expr::bare_call("sizeof", Vec::new()), Expr::ident("scope")],
                )],
            )));
        add_method(&mut model, allocate, diagnostics);

        let mut uses_value_layout = false;
        for field in layout.accessible_fields() {
            match field.member() {
                LayoutMember::Value { name: Some(name), carrier } => {
                    let ident = sanitize_identifier(name);
                    let offset = long_literal(field.offset());
                    add_method(&mut model, value_getter(&ident, *carrier, offset.clone(), None), diagnostics);
                    add_method(&mut model, value_setter(&ident, *carrier, offset, None), diagnostics);
                    uses_value_layout = true;
                }
                LayoutMember::Sequence { name: Some(name), element, .. } => {
                    if let LayoutMember::Value { carrier, .. } = element.as_ref() {
                        let ident = sanitize_identifier(name);
                        let offset = indexed_offset(field.offset(), carrier.size());
                        let index = Parameter::new("index", TypeRef::Primitive(PrimitiveType::Long));
                        add_method(
                            &mut model,
                            value_getter(&ident, *carrier, offset.clone(), Some(index.clone())),
                            diagnostics,
                        );
                        add_method(&mut model, value_setter(&ident, *carrier, offset, Some(index)), diagnostics);
                        uses_value_layout = true;
                    }
                }
                _ => {}
            }
        }
        if uses_value_layout {
            model.import_qualified(VALUE_LAYOUT_IMPORT);
        }

        model
    }

    /// Typed accessors for member regions whose shape equals a known base.
    /// Reads the registry only, so bases can be processed in parallel.
    pub fn substruct_accessors(&self, base: &BaseImplementation, ctx: &ResolverContext) -> Vec<WrapperMethod> {
        let mut accessors = Vec::new();

        for field in base.layout.accessible_fields() {
            match field.member() {
                LayoutMember::Group(group) => {
                    let (Some(name), Some(target)) = (group.name(), ctx.find_equal(group)) else {
                        continue;
                    };
                    if target == base.id {
                        continue;
                    }
                    let target = ctx.base(target);
                    let slice = slice_of(long_literal(field.offset()), target.size());
                    accessors.push(
                        WrapperMethod::new(&sanitize_identifier(name), Modifiers::public(), target.model.type_ref())
                            .with_statement(Statement::Return(Expr::new_object(target.model.type_ref(), vec![slice]))),
                    );
                }
                LayoutMember::Sequence { name: Some(name), element, .. } => {
                    let LayoutMember::Group(group) = element.as_ref() else {
                        continue;
                    };
                    let Some(target) = ctx.find_equal(group).filter(|id| *id != base.id) else {
                        continue;
                    };
                    let target = ctx.base(target);
                    let offset = indexed_offset(field.offset(), target.size());
                    let slice = slice_of(offset, target.size());
                    accessors.push(
                        WrapperMethod::new(&sanitize_identifier(name), Modifiers::public(), target.model.type_ref())
                            .with_param(Parameter::new("index", TypeRef::Primitive(PrimitiveType::Long)))
                            .with_statement(Statement::Return(Expr::new_object(target.model.type_ref(), vec![slice]))),
                    );
                }
                _ => {}
            }
        }

        accessors
    }

    /// Thin declaration for an alias: derives from the wrapper of `via` and
    /// forwards its segment.
    pub fn alias_model(&self, native: &str, via: &str) -> WrapperType {
        let mut model = WrapperType::new(&self.package, native, Modifiers::public());
        model.set_supertype(self.type_ref(via));
        let constructor = Constructor::new(Modifiers::public())
            .with_param(Parameter::new(SEGMENT, TypeRef::Segment))
            .with_statement(Statement::Expr(Expr::bare_call("super", vec![Expr::ident(SEGMENT)])));
        // A fresh model cannot already have a constructor.
        let _ = model.set_constructor(constructor);
        model
    }
}

fn add_field(model: &mut WrapperType, field: WrapperField, diagnostics: &Diagnostics) {
    if let Err(e) = model.add_field(field) {
        diagnostics.report(DiagnosticKind::MemberConflict, &model.name, e.to_string());
    }
}

fn add_method(model: &mut WrapperType, method: WrapperMethod, diagnostics: &Diagnostics) {
    if let Err(e) = model.add_method(method) {
        diagnostics.report(DiagnosticKind::MemberConflict, &model.name, e.to_string());
    }
}

fn long_literal(value: u64) -> Expr {
    Expr::literal(format!("{}L", value))
}

fn indexed_offset(offset: u64, stride: u64) -> Expr {
    Expr::add(long_literal(offset), Expr::mul(Expr::ident("index"), long_literal(stride)))
}

fn slice_of(offset: Expr, size: u64) -> Expr {
    Expr::call(Expr::ident(SEGMENT), "asSlice", vec![offset, long_literal(size)])
}

fn value_layout(carrier: PrimitiveType) -> Expr {
    Expr::Field {
        target: Box::new(Expr::ident(VALUE_LAYOUT)),
        name: carrier.value_layout().to_string(),
    }
}

fn value_getter(name: &str, carrier: PrimitiveType, offset: Expr, index: Option<Parameter>) -> WrapperMethod {
    let mut getter = WrapperMethod::new(name, Modifiers::public(), TypeRef::Primitive(carrier));
    if let Some(index) = index {
        getter = getter.with_param(index);
    }
    getter.with_statement(Statement::Return(Expr::call(
        Expr::ident(SEGMENT),
        "get",
        vec![value_layout(carrier), offset],
    )))
}

fn value_setter(name: &str, carrier: PrimitiveType, offset: Expr, index: Option<Parameter>) -> WrapperMethod {
    let mut setter = WrapperMethod::new(name, Modifiers::public(), TypeRef::Void);
    if let Some(index) = index {
        setter = setter.with_param(index);
    }
    setter
        .with_param(Parameter::new("value", TypeRef::Primitive(carrier)))
        .with_statement(Statement::Expr(Expr::call(
            Expr::ident(SEGMENT),
            "set",
            vec![value_layout(carrier), offset, Expr::ident("value")],
        )))
}
