//! Marshaling Codegen.
//!
//! Emits the code that moves parameter values between their typed form and
//! their wire pairs. The service side reads every parameter of a group,
//! aggregates the failures of the group and bails out once with a composite
//! error; the client side appends wire pairs through a `ParamsWriter`.
//!
//! Wire rendering is the inverse of decoding for every primitive: values
//! are rendered with `Display`, except date-times which use an ISO 8601
//! format that their `FromStr` accepts.

use crate::common::CodeWriter;
use crate::naming::NamingPolicy;
use crate::resolver::{Resolver, TargetType, TypePaths};
use specgen_core::{
    Error, Location, Param, ParamLocation, Primitive, Result, TypeExpr,
};

/// `chrono` format of date-time wire values.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Container shape of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamShape {
    /// `T`
    Required,
    /// `T?`
    Optional,
    /// `T[]`, one wire pair per element
    Array,
}

impl ParamShape {
    /// Classifies a parameter type; `None` for shapes no wire format carries.
    ///
    /// # Examples
    ///
    /// ```
    /// use specgen_codegen::marshal::ParamShape;
    ///
    /// assert_eq!(ParamShape::of(&"int?".parse().unwrap()), Some(ParamShape::Optional));
    /// assert_eq!(ParamShape::of(&"int[]".parse().unwrap()), Some(ParamShape::Array));
    /// assert_eq!(ParamShape::of(&"int[]?".parse().unwrap()), None);
    /// ```
    #[must_use]
    pub fn of(ty: &TypeExpr) -> Option<Self> {
        match ty {
            TypeExpr::Plain(_) => Some(Self::Required),
            TypeExpr::Nullable(inner) if matches!(inner.as_ref(), TypeExpr::Plain(_)) => {
                Some(Self::Optional)
            }
            TypeExpr::Array(inner) if matches!(inner.as_ref(), TypeExpr::Plain(_)) => {
                Some(Self::Array)
            }
            TypeExpr::Nullable(_) | TypeExpr::Array(_) | TypeExpr::Map(_) => None,
        }
    }
}

/// Encoder and decoder of one parameter.
#[derive(Debug, Clone)]
pub struct ParamCodec<'a> {
    /// The declared parameter
    pub param: &'a Param,
    /// Where it is carried
    pub location: ParamLocation,
    /// Rust identifier of the value
    pub ident: String,
    /// Container shape
    pub shape: ParamShape,
    /// Full resolved type
    pub ty: TargetType,
    /// Resolved element type
    pub leaf: TargetType,
}

impl<'a> ParamCodec<'a> {
    /// Resolves the parameter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedParamType`] for shapes outside `T`, `T?`
    /// and `T[]`, or a resolution error.
    pub fn new(
        param: &'a Param,
        location: ParamLocation,
        resolver: &Resolver<'_>,
        naming: &dyn NamingPolicy,
        at: &Location,
    ) -> Result<Self> {
        let at = at.child(param.name.as_str());
        let shape = ParamShape::of(&param.ty).ok_or_else(|| Error::UnsupportedParamType {
            ty: param.ty.to_string(),
            location: at.clone(),
        })?;
        let ty = resolver.resolve(&param.ty, &at)?;
        let leaf = ty.leaf().clone();
        Ok(Self {
            param,
            location,
            ident: naming.field_name(param.name.as_str()),
            shape,
            ty,
            leaf,
        })
    }

    /// Wire name as a Rust string literal.
    #[must_use]
    pub fn wire_name(&self) -> String {
        literal(self.param.name.as_str())
    }

    fn is_datetime(&self) -> bool {
        self.leaf.is_primitive(Primitive::DateTime)
    }

    /// Expression reading the value from `parser`, yielding `Option<T>`.
    #[must_use]
    pub fn decode_expr(&self, parser: &str, naming: &dyn NamingPolicy) -> String {
        let leaf = self.leaf.render(naming, TypePaths::API);
        let name = self.wire_name();
        let default = self.param.default.as_deref().map(literal);
        let enum_suffix = self.leaf.is_enum().then(|| format!(", {leaf}::VALUES"));

        match (self.shape, default, enum_suffix) {
            (ParamShape::Array, _, None) => format!("{parser}.array::<{leaf}>({name})"),
            (ParamShape::Array, _, Some(values)) => {
                format!("{parser}.enum_array::<{leaf}>({name}{values})")
            }
            (shape, Some(default), None) => {
                let expr = format!("{parser}.with_default::<{leaf}>({name}, {default})");
                wrap_optional(shape, expr)
            }
            (shape, Some(default), Some(values)) => {
                let expr = format!("{parser}.enum_with_default::<{leaf}>({name}, {default}{values})");
                wrap_optional(shape, expr)
            }
            (ParamShape::Required, None, None) => format!("{parser}.required::<{leaf}>({name})"),
            (ParamShape::Required, None, Some(values)) => {
                format!("{parser}.required_enum::<{leaf}>({name}{values})")
            }
            (ParamShape::Optional, None, None) => format!("{parser}.optional::<{leaf}>({name})"),
            (ParamShape::Optional, None, Some(values)) => {
                format!("{parser}.optional_enum::<{leaf}>({name}{values})")
            }
        }
    }

    /// Statement appending the value held by the place `value` to `writer`.
    #[must_use]
    pub fn encode_stmt(&self, writer: &str, value: &str) -> String {
        let name = self.wire_name();
        let format = literal(DATETIME_FORMAT);
        match (self.shape, self.is_datetime()) {
            (ParamShape::Required, false) => format!("{writer}.add({name}, &{value});"),
            (ParamShape::Required, true) => {
                format!("{writer}.add({name}, {value}.format({format}));")
            }
            (ParamShape::Optional, false) => {
                format!("{writer}.add_optional({name}, {value}.as_ref());")
            }
            (ParamShape::Optional, true) => format!(
                "{writer}.add_optional({name}, {value}.as_ref().map(|v| v.format({format})));"
            ),
            (ParamShape::Array, false) => format!("{writer}.add_array({name}, &{value});"),
            (ParamShape::Array, true) => format!(
                "{writer}.add_array({name}, {value}.iter().map(|v| v.format({format})));"
            ),
        }
    }

    /// Argument substituted into a URL template.
    #[must_use]
    pub fn url_arg(&self) -> String {
        if self.is_datetime() {
            format!("{}.format({})", self.ident, literal(DATETIME_FORMAT))
        } else {
            self.ident.clone()
        }
    }
}

fn wrap_optional(shape: ParamShape, expr: String) -> String {
    if shape == ParamShape::Optional {
        format!("{expr}.map(Some)")
    } else {
        expr
    }
}

/// Renders a Rust string literal.
#[must_use]
pub fn literal(value: &str) -> String {
    format!("{value:?}")
}

/// One parameter group decoded by the service.
#[derive(Debug, Clone, Copy)]
pub struct DecodeGroup<'g> {
    /// Name of the parser variable
    pub parser: &'g str,
    /// `ParamsParser` constructor call, e.g. `ParamsParser::query(query_pairs)`
    pub source: &'g str,
    /// Statement returning early; `{errors}` is replaced by the failures
    pub on_error: &'g str,
}

/// Writes the decoding of a group: one `let` per parameter, then a single
/// `let ... else` that returns the aggregated failures.
pub fn decode_group(
    w: &mut CodeWriter,
    group: DecodeGroup<'_>,
    codecs: &[ParamCodec<'_>],
    naming: &dyn NamingPolicy,
) {
    if codecs.is_empty() {
        return;
    }
    w.line(format!("let mut {} = {};", group.parser, group.source));
    for codec in codecs {
        w.line(format!(
            "let {} = {};",
            codec.ident,
            codec.decode_expr(group.parser, naming)
        ));
    }
    let patterns: Vec<String> = codecs
        .iter()
        .map(|codec| format!("Some({})", codec.ident))
        .collect();
    let values: Vec<&str> = codecs.iter().map(|codec| codec.ident.as_str()).collect();
    w.open(format!(
        "let ({},) = ({},) else",
        patterns.join(", "),
        values.join(", ")
    ));
    let errors = format!("{}.into_errors()", group.parser);
    w.line(group.on_error.replace("{errors}", &errors));
    w.close("};");
}

/// Writes the encoding of a group into a fresh `ParamsWriter` named `writer`.
/// Values are read from `prefix` followed by each identifier.
pub fn encode_group(w: &mut CodeWriter, writer: &str, prefix: &str, codecs: &[ParamCodec<'_>]) {
    if codecs.is_empty() {
        return;
    }
    w.line(format!("let mut {writer} = ParamsWriter::new();"));
    for codec in codecs {
        w.line(codec.encode_stmt(writer, &format!("{prefix}{}", codec.ident)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::RustNaming;
    use specgen_core::{HttpErrors, Version};

    fn version() -> Version {
        serde_json::from_value(serde_json::json!({
            "name": "v1",
            "models": [{
                "name": "Color",
                "kind": { "enum": { "values": [{ "value": "red" }, { "value": "blue" }] } }
            }]
        }))
        .unwrap()
    }

    fn codec<'a>(param: &'a Param, version: &Version, errors: &HttpErrors) -> ParamCodec<'a> {
        let resolver = Resolver::for_version(version, errors);
        ParamCodec::new(param, ParamLocation::Query, &resolver, &RustNaming, &Location::root())
            .unwrap()
    }

    #[test]
    fn test_decode_expressions() {
        let version = version();
        let errors = HttpErrors::default();
        let cases = [
            (Param::new("page", "int".parse().unwrap()), "p.required::<i32>(\"page\")"),
            (
                Param::new("page", "int".parse().unwrap()).with_default("1"),
                "p.with_default::<i32>(\"page\", \"1\")",
            ),
            (
                Param::new("size", "int?".parse().unwrap()).with_default("10"),
                "p.with_default::<i32>(\"size\", \"10\").map(Some)",
            ),
            (Param::new("q", "string?".parse().unwrap()), "p.optional::<String>(\"q\")"),
            (Param::new("ids", "uuid[]".parse().unwrap()), "p.array::<Uuid>(\"ids\")"),
            (
                Param::new("color", "Color".parse().unwrap()),
                "p.required_enum::<models::Color>(\"color\", models::Color::VALUES)",
            ),
            (
                Param::new("colors", "Color[]".parse().unwrap()),
                "p.enum_array::<models::Color>(\"colors\", models::Color::VALUES)",
            ),
        ];
        for (param, expected) in &cases {
            assert_eq!(codec(param, &version, &errors).decode_expr("p", &RustNaming), *expected);
        }
    }

    #[test]
    fn test_encode_statements() {
        let version = version();
        let errors = HttpErrors::default();
        let at = Param::new("at", "datetime?".parse().unwrap());
        let tags = Param::new("tags", "string[]".parse().unwrap());
        let page = Param::new("page", "int".parse().unwrap());

        assert_eq!(
            codec(&at, &version, &errors).encode_stmt("query", "at"),
            "query.add_optional(\"at\", at.as_ref().map(|v| v.format(\"%Y-%m-%dT%H:%M:%S%.f\")));"
        );
        assert_eq!(
            codec(&tags, &version, &errors).encode_stmt("form", "body.tags"),
            "form.add_array(\"tags\", &body.tags);"
        );
        assert_eq!(
            codec(&page, &version, &errors).encode_stmt("query", "page"),
            "query.add(\"page\", &page);"
        );
    }

    #[test]
    fn test_decode_group_aggregates() {
        let version = version();
        let errors = HttpErrors::default();
        let a = Param::new("a", "int".parse().unwrap());
        let b = Param::new("X-B", "bool?".parse().unwrap());
        let codecs = vec![codec(&a, &version, &errors), codec(&b, &version, &errors)];

        let mut w = CodeWriter::new();
        decode_group(
            &mut w,
            DecodeGroup {
                parser: "query_parser",
                source: "ParamsParser::query(query_pairs)",
                on_error: "return fail({errors});",
            },
            &codecs,
            &RustNaming,
        );
        assert_eq!(
            w.finish(),
            "let mut query_parser = ParamsParser::query(query_pairs);\n\
             let a = query_parser.required::<i32>(\"a\");\n\
             let x_b = query_parser.optional::<bool>(\"X-B\");\n\
             let (Some(a), Some(x_b),) = (a, x_b,) else {\n    \
             return fail(query_parser.into_errors());\n\
             };\n"
        );
    }

    #[test]
    fn test_unsupported_shape() {
        let version = version();
        let errors = HttpErrors::default();
        let resolver = Resolver::for_version(&version, &errors);
        let param = Param::new("m", "int{}".parse().unwrap());
        let err = ParamCodec::new(&param, ParamLocation::Header, &resolver, &RustNaming, &Location::root())
            .unwrap_err();
        assert!(err.is_param_error());
    }
}
