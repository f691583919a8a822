// Tue Jan 24 2026 - Alex

use crate::binding::{BindingSet, EntryCarrier, NativeType, Signature, TableEntry};
use crate::com::{ComMethod, ComWrapper, IidPolicy};
use crate::config::Config;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::model::{Constructor, Expr, Modifiers, Parameter, Statement, TypeRef, WrapperField, WrapperMethod, WrapperType};
use crate::structure::PrimitiveType;
use crate::utils::naming::sanitize_identifier;

const SCOPE: &str = "scope";
const OBJ: &str = "obj";
const VTBL: &str = "vtbl";
const ADDRESS: &str = "address";
const SEGMENT: &str = "segment";

/// Builds an object wrapper from an interface type and its function table.
pub struct ComSynthesizer {
    package: String,
    raw_package: String,
    holder: TypeRef,
    wrapper_suffix: String,
    table_pointer: String,
    iid: IidPolicy,
}

impl ComSynthesizer {
    pub fn new(package: &str, bindings: &BindingSet) -> Self {
        Self {
            package: package.to_string(),
            raw_package: bindings.package().to_string(),
            holder: bindings.holder(),
            wrapper_suffix: "_J".to_string(),
            table_pointer: "lpVtbl".to_string(),
            iid: IidPolicy::new(),
        }
    }

    pub fn from_config(config: &Config, bindings: &BindingSet) -> Self {
        Self::new(&config.com_package, bindings)
            .with_wrapper_suffix(&config.com_wrapper_suffix)
            .with_table_pointer(&config.table_pointer_member)
            .with_iid_policy(IidPolicy::from_config(config))
    }

    pub fn with_wrapper_suffix(mut self, suffix: &str) -> Self {
        self.wrapper_suffix = suffix.to_string();
        self
    }

    pub fn with_table_pointer(mut self, member: &str) -> Self {
        self.table_pointer = member.to_string();
        self
    }

    pub fn with_iid_policy(mut self, policy: IidPolicy) -> Self {
        self.iid = policy;
        self
    }

    pub fn synthesize(&self, object: &NativeType, table: &NativeType, diagnostics: &Diagnostics) -> ComWrapper {
        let object_ty = TypeRef::named(&self.raw_package, &object.name);
        let table_ty = TypeRef::named(&self.raw_package, &table.name);
        let wrapper_name = format!("{}{}", object.name, self.wrapper_suffix);

        let mut model = WrapperType::new(&self.package, &wrapper_name, Modifiers::public());
        model.import(&object_ty);
        model.import(&table_ty);
        model.import(&self.holder);

        let identity = [
            WrapperField::new(SCOPE, TypeRef::Scope, Modifiers::package().with_final())
                .with_initializer(Expr::static_call(&TypeRef::Scope, "newImplicitScope", Vec::new())),
            WrapperField::new(OBJ, TypeRef::Primitive(PrimitiveType::Address), Modifiers::public().with_final()),
            WrapperField::new(VTBL, TypeRef::Segment, Modifiers::package().with_final()),
        ];
        for field in identity {
            if let Err(e) = model.add_field(field) {
                diagnostics.report(DiagnosticKind::MemberConflict, &wrapper_name, e.to_string());
            }
        }

        let mut kept = Vec::new();
        for entry in &table.entries {
            match applicable(entry) {
                Ok(signature) => kept.push((entry, signature)),
                Err(reason) => diagnostics.report(
                    DiagnosticKind::UnsupportedEntry,
                    &format!("{}.{}", object.name, entry.name),
                    reason,
                ),
            }
        }

        let mut constructor = Constructor::new(Modifiers::public())
            .with_param(Parameter::new(ADDRESS, TypeRef::Primitive(PrimitiveType::Address)))
            .with_statement(Statement::Local {
                name: SEGMENT.to_string(),
                value: Expr::static_call(&object_ty, "ofAddress", vec![Expr::ident(ADDRESS), Expr::ident(SCOPE)]),
            })
            .with_statement(Statement::Assign {
                target: Expr::this_field(OBJ),
                value: Expr::ident(ADDRESS),
            })
            .with_statement(Statement::Assign {
                target: Expr::ident(VTBL),
                value: Expr::static_call(
                    &table_ty,
                    "ofAddress",
                    vec![
                        Expr::static_call(&object_ty, &format!("{}$get", self.table_pointer), vec![Expr::ident(SEGMENT)]),
                        Expr::ident(SCOPE),
                    ],
                ),
            });

        if let Some(accessor) = self.iid.accessor(&object.name) {
            let refiid = WrapperMethod::new("REFIID", Modifiers::public().with_static(), TypeRef::Segment)
                .with_statement(Statement::Return(Expr::static_call(&self.holder, &accessor, Vec::new())));
            if let Err(e) = model.add_method(refiid) {
                diagnostics.report(DiagnosticKind::MemberConflict, &wrapper_name, e.to_string());
            }
        }

        let mut methods = Vec::with_capacity(kept.len());
        for (entry, signature) in kept {
            let ident = sanitize_identifier(&entry.name);
            let callable_ty = TypeRef::nested(&table_ty, &entry.name);
            let params: Vec<Parameter> = signature.params[1..].to_vec();

            let mut args = vec![Expr::ident(OBJ)];
            args.extend(params.iter().map(Parameter::as_arg));
            let call = Expr::call(Expr::ident(&ident), "apply", args);
            let body = if signature.returns.is_void() {
                Statement::Expr(call)
            } else {
                Statement::Return(call)
            };

            let method = params
                .iter()
                .cloned()
                .fold(
                    WrapperMethod::new(&ident, Modifiers::public(), signature.returns.clone()),
                    WrapperMethod::with_param,
                )
                .with_statement(body);
            let field = WrapperField::new(&ident, callable_ty, Modifiers::package().with_final());

            // both members are checked before either is added
            let added = model
                .check_field(&field)
                .and_then(|_| model.check_method(&method))
                .and_then(|_| model.add_field(field))
                .and_then(|_| model.add_method(method));
            if let Err(e) = added {
                diagnostics.report(DiagnosticKind::MemberConflict, &wrapper_name, e.to_string());
                continue;
            }
            constructor = constructor.with_statement(Statement::Assign {
                target: Expr::ident(&ident),
                value: Expr::static_call(&table_ty, &entry.name, vec![Expr::ident(VTBL)]),
            });
            methods.push(ComMethod {
                name: ident,
                returns: signature.returns.clone(),
                params,
            });
        }

        if let Err(e) = model.set_constructor(constructor) {
            diagnostics.report(DiagnosticKind::MemberConflict, &wrapper_name, e.to_string());
        }

        log::trace!("{}: {} of {} table entries forwarded", wrapper_name, methods.len(), table.entries.len());
        ComWrapper {
            object: object.name.clone(),
            table: table.name.clone(),
            methods,
            model,
        }
    }
}

/// The callable signature of a table slot, if the slot can be forwarded.
fn applicable(entry: &TableEntry) -> Result<&Signature, String> {
    match &entry.carrier {
        EntryCarrier::Value(ty) => Err(format!("slot of type {} is not callable", ty)),
        EntryCarrier::Functional { methods, .. } => match methods.as_slice() {
            [signature] if !signature.params.is_empty() => Ok(signature),
            [_] => Err("callable takes no receiver".to_string()),
            _ => Err(format!("functional type declares {} methods", methods.len())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::{method_entry, ManifestBuilder};

    fn int() -> TypeRef {
        TypeRef::Primitive(PrimitiveType::Int)
    }

    fn bindings(object: &str, entries: Vec<TableEntry>) -> BindingSet {
        ManifestBuilder::new("win32.pure").with_interface(object, entries).build()
    }

    fn synthesize(bindings: &BindingSet, object: &str, diagnostics: &Diagnostics) -> ComWrapper {
        let synth = ComSynthesizer::from_config(&Config::default(), bindings);
        let table = format!("{}Vtbl", object);
        synth.synthesize(bindings.get(object).unwrap(), bindings.get(&table).unwrap(), diagnostics)
    }

    #[test]
    fn test_non_functional_entry_is_dropped() {
        let set = bindings(
            "IFoo",
            vec![
                method_entry("AddRef", int(), &[]),
                TableEntry::value("Reserved", TypeRef::Primitive(PrimitiveType::Address)),
                method_entry("Release", int(), &[]),
            ],
        );
        let diagnostics = Diagnostics::new();
        let wrapper = synthesize(&set, "IFoo", &diagnostics);

        assert_eq!(wrapper.method_count(), 2);
        assert_eq!(diagnostics.count(DiagnosticKind::UnsupportedEntry), 1);
        // identity fields plus one callable per forwarded entry
        assert_eq!(wrapper.model.fields.len(), 5);
        assert!(wrapper.model.field("Reserved").is_none());
    }

    #[test]
    fn test_forwarding_drops_receiver() {
        let set = bindings(
            "IFoo",
            vec![
                method_entry("Bar", int(), &[("x", int())]),
                method_entry("Clear", TypeRef::Void, &[]),
            ],
        );
        let diagnostics = Diagnostics::new();
        let wrapper = synthesize(&set, "IFoo", &diagnostics);

        let bar = wrapper.model.method("Bar").unwrap();
        assert_eq!(bar.name, "Bar");
        assert_eq!(bar.returns, int());
        assert_eq!(bar.params, vec![Parameter::new("x", int())]);
        assert_eq!(bar.body[0].to_string(), "return Bar.apply(obj, x);");

        let clear = wrapper.model.method("Clear").unwrap();
        assert!(clear.params.is_empty());
        assert_eq!(clear.body[0].to_string(), "Clear.apply(obj);");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_conflicting_entry_leaves_no_callable_field() {
        // REFIID with no arguments collides with the identity accessor
        let set = bindings(
            "IFoo",
            vec![
                method_entry("REFIID", TypeRef::Segment, &[]),
                method_entry("Bar", int(), &[("x", int())]),
            ],
        );
        let diagnostics = Diagnostics::new();
        let wrapper = synthesize(&set, "IFoo", &diagnostics);
        let model = &wrapper.model;

        assert_eq!(diagnostics.count(DiagnosticKind::MemberConflict), 1);
        assert_eq!(wrapper.method_count(), 1);
        assert!(model.field("REFIID").is_none());
        assert_eq!(model.methods_named("REFIID").count(), 1);
        // scope, obj, vtbl and Bar
        assert_eq!(model.fields.len(), 4);
        let body = &model.constructor.as_ref().unwrap().body;
        assert_eq!(body.len(), 4);
        assert!(body.iter().all(|s| !s.to_string().starts_with("REFIID")));
    }

    #[test]
    fn test_model_shape() {
        let set = bindings("IFoo", vec![method_entry("Bar", int(), &[("x", int())])]);
        let diagnostics = Diagnostics::new();
        let wrapper = synthesize(&set, "IFoo", &diagnostics);
        let model = &wrapper.model;

        assert_eq!(model.name, "IFoo_J");
        assert_eq!(model.package, "win32.mapped.com");
        assert!(model.field("obj").unwrap().modifiers.is_final());
        assert_eq!(
            model.field("scope").unwrap().initializer.as_ref().unwrap().to_string(),
            "ResourceScope.newImplicitScope()"
        );
        assert_eq!(model.field("Bar").unwrap().ty.simple_name(), "IFooVtbl.Bar");
        assert!(model.imports.contains("win32.pure.IFooVtbl"));
        assert!(model.imports.contains("win32.pure.Win32"));

        let body: Vec<String> = model.constructor.as_ref().unwrap().body.iter().map(ToString::to_string).collect();
        assert_eq!(
            body,
            vec![
                "var segment = IFoo.ofAddress(address, scope);",
                "this.obj = address;",
                "vtbl = IFooVtbl.ofAddress(IFoo.lpVtbl$get(segment), scope);",
                "Bar = IFooVtbl.Bar(vtbl);",
            ]
        );
        assert_eq!(
            model.method("REFIID").unwrap().body[0].to_string(),
            "return Win32.IID_IFoo$SEGMENT();"
        );
    }

    #[test]
    fn test_identity_exceptions() {
        let diagnostics = Diagnostics::new();
        let include = bindings("ID3DInclude", vec![method_entry("Close", int(), &[])]);
        assert!(!synthesize(&include, "ID3DInclude", &diagnostics).has_identity_accessor());

        let events = bindings("XMLDOMDocumentEvents", Vec::new());
        let wrapper = synthesize(&events, "XMLDOMDocumentEvents", &diagnostics);
        assert_eq!(
            wrapper.model.method("REFIID").unwrap().body[0].to_string(),
            "return Win32.DIID_XMLDOMDocumentEvents$SEGMENT();"
        );
        assert_eq!(wrapper.method_count(), 0);
    }
}
