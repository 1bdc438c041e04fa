use llm_eval_compare_core::{CoreError, Navigator, Result};
use url::{Position, Url};

use crate::selection::RunSelection;

pub const RUN_IDS_QUERY_PARAM: &str = "evaluation_run_ids";

const PATH_BASE: &str = "http://localhost/";

/// `/evaluations/{evaluation}/{datapoint}?evaluation_run_ids=...` with every part encoded.
pub fn datapoint_path(
    evaluation_name: &str,
    datapoint_id: &str,
    selection: &RunSelection,
) -> Result<String> {
    let mut url = Url::parse(PATH_BASE)
        .map_err(|e| CoreError::InvalidInput(format!("Invalid path base: {}", e)))?;

    url.path_segments_mut()
        .map_err(|_| CoreError::InvalidInput("Path base cannot hold segments".to_string()))?
        .pop_if_empty()
        .push("evaluations")
        .push(evaluation_name)
        .push(datapoint_id);

    url.query_pairs_mut()
        .append_pair(RUN_IDS_QUERY_PARAM, &selection.to_query_value());

    Ok(url[Position::BeforePath..].to_string())
}

/// Build the datapoint path and hand it to the navigator. Nothing is returned.
pub fn activate(
    evaluation_name: &str,
    datapoint_id: &str,
    selection: &RunSelection,
    navigator: &dyn Navigator,
) {
    match datapoint_path(evaluation_name, datapoint_id, selection) {
        Ok(path) => navigator.navigate(&path),
        Err(e) => tracing::warn!(
            evaluation_name,
            datapoint_id,
            error = %e,
            "Could not build datapoint path"
        ),
    }
}
