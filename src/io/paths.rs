//! Deterministic file-path templating.
//!
//! Datasets are keyed by (model, slice); exports are keyed by the full run
//! spec. Downstream scripts glob these names, so the templates are part of the
//! tool's contract and covered by tests.

use std::path::{Path, PathBuf};

use crate::domain::RunSpec;

/// `<data_dir>/model{model}_{slice}.csv`
pub fn dataset_path(data_dir: &Path, model: &str, slice: &str) -> PathBuf {
    data_dir.join(format!("model{model}_{slice}.csv"))
}

/// `reg_{log}_{out_var}_{mode}_model{model}_{slice}` (no extension).
pub fn table_stem(spec: &RunSpec) -> String {
    format!(
        "reg_{}_{}_{}_model{}_{}",
        spec.out_log.label(),
        spec.out_var,
        spec.mode.label(),
        spec.model,
        spec.slice
    )
}

/// Machine-readable table path: `<table_dir>/<stem>.json`
pub fn table_json_path(table_dir: &Path, spec: &RunSpec) -> PathBuf {
    table_dir.join(format!("{}.json", table_stem(spec)))
}

/// Human-readable table path: `<text_dir>/<stem>.txt`
pub fn table_text_path(text_dir: &Path, spec: &RunSpec) -> PathBuf {
    text_dir.join(format!("{}.txt", table_stem(spec)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Mode, OutLog};

    fn spec(out_log: OutLog) -> RunSpec {
        RunSpec {
            model: "3xg".to_string(),
            slice: "team_is_nbhd".to_string(),
            mode: Mode::FixedByFnSubtype,
            out_var: "team_productivity".to_string(),
            out_log,
        }
    }

    #[test]
    fn dataset_path_is_templated_from_model_and_slice() {
        let path = dataset_path(Path::new("data/sets"), "3xg", "team_is_nbhd");
        assert_eq!(path, Path::new("data/sets/model3xg_team_is_nbhd.csv"));
    }

    #[test]
    fn table_paths_are_deterministic_functions_of_the_spec() {
        let spec = spec(OutLog::Log10);
        assert_eq!(
            table_stem(&spec),
            "reg_log10_team_productivity_fixed_by_fn_subtype_model3xg_team_is_nbhd"
        );
        assert_eq!(table_stem(&spec), table_stem(&spec.clone()));

        let json = table_json_path(Path::new("data/regression"), &spec);
        let text = table_text_path(Path::new("figures/regression"), &spec);
        assert!(json.to_string_lossy().ends_with(".json"));
        assert!(text.to_string_lossy().ends_with(".txt"));
    }

    #[test]
    fn linear_runs_keep_the_linear_label() {
        let spec = spec(OutLog::Linear);
        assert!(table_stem(&spec).starts_with("reg_linear_"));
    }
}
