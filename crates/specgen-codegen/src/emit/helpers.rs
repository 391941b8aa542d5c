//! Shared helper files.
//!
//! The helpers are the `specgen-runtime` sources, emitted with the generated
//! header and without their unit tests.

use super::{EmitContext, Run};
use crate::common::{GENERATED_HEADER, GeneratedFile};
use crate::usage::spec_has_body_of_kind;
use specgen_core::BodyKind;

/// One helper module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Helper {
    /// Module name inside the generated root
    pub module: &'static str,
    source: &'static str,
}

const fn helper(module: &'static str, source: &'static str) -> Helper {
    Helper { module, source }
}

const CONTENT_TYPE: Helper = helper(
    "content_type",
    include_str!("../../../specgen-runtime/src/content_type.rs"),
);
const CONVERT: Helper = helper(
    "convert",
    include_str!("../../../specgen-runtime/src/convert.rs"),
);
const EMPTY: Helper = helper("empty", include_str!("../../../specgen-runtime/src/empty.rs"));
const ERRMODELS: Helper = helper(
    "errmodels",
    include_str!("../../../specgen-runtime/src/errmodels.rs"),
);
const FORM: Helper = helper("form", include_str!("../../../specgen-runtime/src/form.rs"));
const JSON: Helper = helper("json", include_str!("../../../specgen-runtime/src/json.rs"));
const PARAMS: Helper = helper("params", include_str!("../../../specgen-runtime/src/params.rs"));
const RESPOND: Helper = helper(
    "respond",
    include_str!("../../../specgen-runtime/src/respond.rs"),
);
const RESPONSE: Helper = helper(
    "response",
    include_str!("../../../specgen-runtime/src/response.rs"),
);

/// Helpers a run emits, sorted by module name.
#[must_use]
pub fn helpers(ctx: &EmitContext<'_>) -> Vec<Helper> {
    let mut selected = match ctx.run {
        Run::Models => vec![EMPTY, ERRMODELS],
        Run::Client => vec![EMPTY, ERRMODELS, PARAMS, RESPONSE],
        Run::Service => vec![CONTENT_TYPE, CONVERT, EMPTY, ERRMODELS, JSON, PARAMS, RESPOND],
    };
    let uses_form = spec_has_body_of_kind(ctx.spec, BodyKind::FormData)
        || spec_has_body_of_kind(ctx.spec, BodyKind::FormUrlEncoded);
    if ctx.run == Run::Service && uses_form {
        selected.push(FORM);
    }
    selected.sort_by_key(|helper| helper.module);
    selected
}

/// Emits the helper files of a run.
#[must_use]
pub fn emit(ctx: &EmitContext<'_>) -> Vec<GeneratedFile> {
    helpers(ctx)
        .into_iter()
        .map(|helper| {
            let content = format!("{GENERATED_HEADER}\n\n{}", without_tests(helper.source));
            GeneratedFile::generated(ctx.generated_path(&format!("{}.rs", helper.module)), content)
        })
        .collect()
}

fn without_tests(source: &str) -> &str {
    match source.find("\n#[cfg(test)]") {
        Some(index) => &source[..=index],
        None => source,
    }
}
