//! # AWS SDK Span Attributes
//!
//! Attribute names produced by AWS SDK instrumentation. Resource attributes
//! identify the AWS resource an operation acts on; the `gen_ai.*` attributes
//! describe Bedrock model invocations and follow the [GenAI semantic
//! conventions].
//!
//! [GenAI semantic conventions]: https://github.com/open-telemetry/semantic-conventions/blob/main/docs/gen-ai/gen-ai-spans.md

/// The S3 bucket name the request refers to.
///
/// # Examples
///
/// - `"some-bucket-name"`
pub const AWS_BUCKET_NAME: &str = "aws.bucket.name";

/// The URL of the SQS queue the request refers to.
///
/// # Examples
///
/// - `"https://sqs.us-east-2.amazonaws.com/123456789012/MyQueue"`
pub const AWS_QUEUE_URL: &str = "aws.queue.url";

/// The name of the SQS queue the request refers to.
pub const AWS_QUEUE_NAME: &str = "aws.queue.name";

/// The name of the Kinesis stream the request refers to.
pub const AWS_STREAM_NAME: &str = "aws.stream.name";

/// The name of the DynamoDB table the request refers to.
pub const AWS_TABLE_NAME: &str = "aws.table.name";

/// The identifier of the Bedrock guardrail.
pub const AWS_BEDROCK_GUARDRAIL_ID: &str = "aws.bedrock.guardrail_id";

/// The identifier of the Bedrock agent.
pub const AWS_BEDROCK_AGENT_ID: &str = "aws.bedrock.agent_id";

/// The identifier of the Bedrock data source.
pub const AWS_BEDROCK_DATA_SOURCE_ID: &str = "aws.bedrock.data_source_id";

/// The identifier of the Bedrock knowledge base.
pub const AWS_BEDROCK_KNOWLEDGE_BASE_ID: &str = "aws.bedrock.knowledge_base_id";

/// The name of the model the request is addressed to.
///
/// # Examples
///
/// - `"anthropic.claude-v2"`
/// - `"amazon.titan-text-express-v1"`
pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";

/// The reason the model stopped generating tokens.
///
/// # Examples
///
/// - `"end_turn"`
/// - `"FINISH"`
pub const GEN_AI_RESPONSE_FINISH_REASON: &str = "gen_ai.response.finish_reason";

/// The number of tokens in the prompt, as reported by the model response.
pub const GEN_AI_USAGE_PROMPT_TOKENS: &str = "gen_ai.usage.prompt_tokens";

/// The number of tokens in the generated completion, as reported by the
/// model response.
pub const GEN_AI_USAGE_COMPLETION_TOKENS: &str = "gen_ai.usage.completion_tokens";

/// The temperature sampling setting of the model request.
pub const GEN_AI_REQUEST_TEMPERATURE: &str = "gen_ai.request.temperature";

/// The top_p (nucleus) sampling setting of the model request.
pub const GEN_AI_REQUEST_TOP_P: &str = "gen_ai.request.top_p";

/// The maximum number of tokens the model request allows to be generated.
pub const GEN_AI_REQUEST_MAX_TOKENS: &str = "gen_ai.request.max_tokens";

/// Returns true if `attribute_name` is one of the GenAI model-invocation
/// attributes, for which [`extract`](crate::extract) should be attempted on
/// the request or response body instead of generic serialization.
pub fn is_gen_ai_attribute(attribute_name: &str) -> bool {
    matches!(
        attribute_name,
        GEN_AI_REQUEST_MODEL
            | GEN_AI_RESPONSE_FINISH_REASON
            | GEN_AI_USAGE_PROMPT_TOKENS
            | GEN_AI_USAGE_COMPLETION_TOKENS
            | GEN_AI_REQUEST_TEMPERATURE
            | GEN_AI_REQUEST_TOP_P
            | GEN_AI_REQUEST_MAX_TOKENS
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gen_ai_attributes_are_recognized() {
        let gen_ai = [
            GEN_AI_REQUEST_MODEL,
            GEN_AI_RESPONSE_FINISH_REASON,
            GEN_AI_USAGE_PROMPT_TOKENS,
            GEN_AI_USAGE_COMPLETION_TOKENS,
            GEN_AI_REQUEST_TEMPERATURE,
            GEN_AI_REQUEST_TOP_P,
            GEN_AI_REQUEST_MAX_TOKENS,
        ];
        for name in gen_ai {
            assert!(is_gen_ai_attribute(name), "{name} should be recognized");
        }
    }

    #[test]
    fn resource_attributes_are_not_gen_ai() {
        for name in [
            AWS_BUCKET_NAME,
            AWS_QUEUE_URL,
            AWS_TABLE_NAME,
            AWS_BEDROCK_AGENT_ID,
            "gen_ai.system",
            "",
        ] {
            assert!(!is_gen_ai_attribute(name), "{name} should not be recognized");
        }
    }
}
