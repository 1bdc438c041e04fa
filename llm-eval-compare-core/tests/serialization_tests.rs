use llm_eval_compare_core::domain::*;
use pretty_assertions::assert_eq;
use serde_json::json;

// ===== Content Serialization Tests =====

#[test]
fn test_input_roundtrip_preserves_every_block_kind() {
    let raw = json!({
        "system": { "assistant_name": "Haiku Bot" },
        "messages": [
            {
                "role": "user",
                "content": [
                    { "type": "structured_text", "arguments": { "topic": "autumn" } },
                    { "type": "unstructured_text", "text": "write a haiku" },
                    { "type": "missing_function_text", "value": "plain" },
                    { "type": "raw_text", "value": "raw" },
                    { "type": "image", "storage_path": "s3://bucket/cat.png" }
                ]
            },
            {
                "role": "assistant",
                "content": [
                    { "type": "tool_call", "name": "lookup", "arguments": { "q": "x" } },
                    { "type": "tool_result", "name": "lookup", "result": "42" },
                    { "type": "thought", "text": "hmm" }
                ]
            }
        ]
    });

    let input: Input = serde_json::from_value(raw.clone()).unwrap();
    let kinds: Vec<&str> = input
        .messages
        .iter()
        .flat_map(|m| m.content.iter().map(InputContent::kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            "structured_text",
            "unstructured_text",
            "missing_function_text",
            "raw_text",
            "image",
            "tool_call",
            "tool_result",
            "thought",
        ]
    );

    assert_eq!(serde_json::to_value(&input).unwrap(), raw);
}

#[test]
fn test_chat_output_roundtrip() {
    let raw = json!([
        { "type": "text", "text": "An autumn haiku" },
        { "type": "tool_call", "name": "lookup", "raw_arguments": "{}" },
        { "type": "unknown", "data": { "vendor": "x" } }
    ]);

    let output: Output = serde_json::from_value(raw.clone()).unwrap();
    match &output {
        Output::Chat(blocks) => {
            assert_eq!(blocks.len(), 3);
            assert_eq!(blocks[2].kind(), "unknown");
        }
        other => panic!("expected chat output, got {:?}", other),
    }
    assert_eq!(serde_json::to_value(&output).unwrap(), raw);
}

#[test]
fn test_json_output_without_raw() {
    let output: Output = serde_json::from_value(json!({ "parsed": null })).unwrap();
    assert_eq!(output, Output::Json(JsonInferenceOutput::default()));
}

// ===== Config Serialization Tests =====

#[test]
fn test_config_store_from_json() {
    let store: ConfigStore = serde_json::from_value(json!({
        "evaluations": {
            "haiku": {
                "function_name": "write_haiku",
                "evaluators": {
                    "exact": { "type": "exact_match" },
                    "judge": { "type": "llm_judge", "optimize": "max", "cutoff": 0.5, "output_type": "boolean" }
                }
            }
        },
        "metrics": {
            "tensorzero::evaluation_name::haiku::evaluator_name::judge": { "type": "boolean", "optimize": "max" }
        }
    }))
    .unwrap();

    let evaluation = store.evaluation("haiku").unwrap();
    assert_eq!(evaluation.function_name.as_deref(), Some("write_haiku"));
    assert_eq!(evaluation.evaluator_names(), vec!["exact".to_string(), "judge".to_string()]);
    assert_eq!(
        evaluation.evaluators["judge"],
        EvaluatorConfig::LlmJudge {
            optimize: Optimize::Max,
            cutoff: Some(0.5),
            output_type: MetricType::Boolean,
        }
    );
    assert_eq!(store.metrics.len(), 1);
}

#[test]
fn test_optimize_serialization() {
    for (optimize, expected) in [(Optimize::Max, "max"), (Optimize::Min, "min")] {
        let json = serde_json::to_string(&optimize).unwrap();
        assert_eq!(json, format!("\"{}\"", expected));
        assert_eq!(optimize.to_string(), expected);
    }
}

// ===== Statistic Serialization Tests =====

#[test]
fn test_statistic_without_stderr() {
    let stat: EvaluationStatistic = serde_json::from_value(json!({
        "evaluation_run_id": "run-1",
        "metric_name": "m",
        "mean_metric": 0.5,
        "datapoint_count": 10
    }))
    .unwrap();
    assert_eq!(stat, EvaluationStatistic::new("run-1", "m", 0.5, None, 10));
}

#[test]
fn test_run_info_roundtrip() {
    let info = EvaluationRunInfo::new("run-1", "gpt-4o-mini");
    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json, json!({ "evaluation_run_id": "run-1", "variant_name": "gpt-4o-mini" }));
    let back: EvaluationRunInfo = serde_json::from_value(json).unwrap();
    assert_eq!(back, info);
}
