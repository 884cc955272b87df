//! Extraction of GenAI model-invocation attributes from Bedrock request and
//! response bodies.
//!
//! Bedrock model providers each report the same semantic field under a
//! different JSON path and sometimes a different numeric type. One family
//! nests request configuration under `textGenerationConfig`, another reports
//! token usage under `usage.input_tokens`/`usage.output_tokens`, a third
//! puts per-result counts under `results[0]`. [`extract`] probes the
//! candidate paths for a field in a fixed priority order and renders the
//! first one present, without needing to know which provider produced the
//! body.

use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::attributes;
use crate::serializer::RawValue;

/// Errors returned when semantic field extraction cannot proceed.
///
/// Unlike the generic serialization path, extraction is asked for explicitly
/// and implies the caller knows the body is JSON. A body that fails to parse
/// therefore surfaces as an error for the instrumentation layer to handle,
/// instead of being silently dropped. A body that parses but lacks the
/// requested field is not an error.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExtractError {
    /// The body was expected to hold a JSON document but did not parse.
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// One step of a JSON path probe.
#[derive(Clone, Copy, Debug)]
enum Segment {
    /// Descend into an object member.
    Key(&'static str),
    /// Descend into an array element.
    Index(usize),
}

/// How a located JSON node is rendered as an attribute string.
#[derive(Clone, Copy, Debug)]
enum Rendering {
    /// Whole-number rendering, no decimal point.
    Int,
    /// The JSON number's native decimal rendering, no fixed precision.
    Float,
    /// The raw string content.
    Text,
}

/// A candidate JSON location for a semantic field.
#[derive(Clone, Copy, Debug)]
struct PathProbe {
    path: &'static [Segment],
    rendering: Rendering,
}

impl PathProbe {
    const fn int(path: &'static [Segment]) -> Self {
        PathProbe {
            path,
            rendering: Rendering::Int,
        }
    }

    const fn float(path: &'static [Segment]) -> Self {
        PathProbe {
            path,
            rendering: Rendering::Float,
        }
    }

    const fn text(path: &'static [Segment]) -> Self {
        PathProbe {
            path,
            rendering: Rendering::Text,
        }
    }

    fn locate<'a>(&self, body: &'a JsonValue) -> Option<&'a JsonValue> {
        self.path.iter().try_fold(body, |node, segment| match *segment {
            Segment::Key(key) => node.get(key),
            Segment::Index(index) => node.get(index),
        })
    }
}

impl Rendering {
    fn render(self, node: &JsonValue) -> Option<String> {
        match self {
            Rendering::Int => node
                .as_i64()
                .or_else(|| node.as_f64().map(|value| value as i64))
                .map(|value| value.to_string()),
            Rendering::Float => node.as_number().map(|number| number.to_string()),
            Rendering::Text => match node {
                JsonValue::String(text) => Some(text.clone()),
                JsonValue::Number(number) => Some(number.to_string()),
                JsonValue::Bool(flag) => Some(flag.to_string()),
                _ => None,
            },
        }
    }
}

const FINISH_REASON_PROBES: &[PathProbe] = &[
    PathProbe::text(&[Segment::Key("stop_reason")]),
    PathProbe::text(&[
        Segment::Key("results"),
        Segment::Index(0),
        Segment::Key("completionReason"),
    ]),
];

const PROMPT_TOKENS_PROBES: &[PathProbe] = &[
    PathProbe::int(&[Segment::Key("prompt_token_count")]),
    PathProbe::int(&[Segment::Key("inputTextTokenCount")]),
    PathProbe::int(&[Segment::Key("usage"), Segment::Key("input_tokens")]),
];

// The inputTextTokenCount probe doubles as an output-token fallback here,
// mirroring the upstream instrumentation's prompt-token logic. Suspected
// upstream copy-paste; kept verbatim pending confirmation.
const COMPLETION_TOKENS_PROBES: &[PathProbe] = &[
    PathProbe::int(&[Segment::Key("generation_token_count")]),
    PathProbe::int(&[
        Segment::Key("results"),
        Segment::Index(0),
        Segment::Key("tokenCount"),
    ]),
    PathProbe::int(&[Segment::Key("inputTextTokenCount")]),
    PathProbe::int(&[Segment::Key("usage"), Segment::Key("output_tokens")]),
];

const TEMPERATURE_PROBES: &[PathProbe] = &[
    PathProbe::float(&[Segment::Key("temperature")]),
    PathProbe::float(&[
        Segment::Key("textGenerationConfig"),
        Segment::Key("temperature"),
    ]),
];

const TOP_P_PROBES: &[PathProbe] = &[
    PathProbe::float(&[Segment::Key("top_p")]),
    PathProbe::float(&[Segment::Key("textGenerationConfig"), Segment::Key("topP")]),
];

const MAX_TOKENS_PROBES: &[PathProbe] = &[
    PathProbe::int(&[Segment::Key("max_tokens")]),
    PathProbe::int(&[Segment::Key("max_gen_len")]),
    PathProbe::int(&[
        Segment::Key("textGenerationConfig"),
        Segment::Key("maxTokenCount"),
    ]),
];

/// A GenAI attribute with at least one known JSON path.
///
/// `gen_ai.request.model` is deliberately missing: it is a recognized GenAI
/// attribute (see [`attributes::is_gen_ai_attribute`]) but is taken from the
/// operation's model id, never from the body, so it has no probes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GenAiField {
    FinishReason,
    PromptTokens,
    CompletionTokens,
    Temperature,
    TopP,
    MaxTokens,
}

impl GenAiField {
    fn from_attribute(attribute_name: &str) -> Option<Self> {
        match attribute_name {
            attributes::GEN_AI_RESPONSE_FINISH_REASON => Some(GenAiField::FinishReason),
            attributes::GEN_AI_USAGE_PROMPT_TOKENS => Some(GenAiField::PromptTokens),
            attributes::GEN_AI_USAGE_COMPLETION_TOKENS => Some(GenAiField::CompletionTokens),
            attributes::GEN_AI_REQUEST_TEMPERATURE => Some(GenAiField::Temperature),
            attributes::GEN_AI_REQUEST_TOP_P => Some(GenAiField::TopP),
            attributes::GEN_AI_REQUEST_MAX_TOKENS => Some(GenAiField::MaxTokens),
            _ => None,
        }
    }

    fn probes(self) -> &'static [PathProbe] {
        match self {
            GenAiField::FinishReason => FINISH_REASON_PROBES,
            GenAiField::PromptTokens => PROMPT_TOKENS_PROBES,
            GenAiField::CompletionTokens => COMPLETION_TOKENS_PROBES,
            GenAiField::Temperature => TEMPERATURE_PROBES,
            GenAiField::TopP => TOP_P_PROBES,
            GenAiField::MaxTokens => MAX_TOKENS_PROBES,
        }
    }
}

/// Extracts the named GenAI attribute from a request or response body.
///
/// The value must be a [`RawValue::Bytes`] buffer holding a JSON document;
/// a [`RawValue::Primitive`] passes through as its text form and any other
/// shape yields nothing. Candidate paths for the field are probed in
/// priority order and the first present node wins.
///
/// # Errors
///
/// Returns [`ExtractError::InvalidJson`] when the byte buffer does not parse
/// as JSON. A well-formed body that simply lacks the field yields `Ok(None)`,
/// as does an attribute name with no known paths.
pub fn extract(
    attribute_name: &str,
    value: &RawValue<'_>,
) -> Result<Option<String>, ExtractError> {
    let bytes = match value {
        RawValue::Bytes(bytes) => *bytes,
        RawValue::Primitive(primitive) => return Ok(Some(primitive.as_str().into_owned())),
        _ => return Ok(None),
    };

    let body: JsonValue = serde_json::from_slice(bytes)?;

    let Some(field) = GenAiField::from_attribute(attribute_name) else {
        return Ok(None);
    };

    for probe in field.probes() {
        if let Some(node) = probe.locate(&body) {
            return Ok(probe.rendering.render(node));
        }
    }
    Ok(None)
}
