//! Bidirectional conversion between concrete paths and key → value
//! mappings, built on a schema's grouping.

use std::collections::HashMap;

use tracing::warn;

use crate::error::{Result, SchemaError};
use crate::schema::Schema;
use crate::token::Token;

/// Decompose a concrete path into a key → value mapping.
pub(crate) fn dict_from_path(schema: &Schema, path: &str) -> Result<HashMap<String, String>> {
    let grouping = schema.grouping();
    let value_segments = split_path(schema, path);

    // Align path segments against schema segments. A deficit of exactly
    // one is explained by an optional leading segment, elided on a view;
    // anything else is a mismatch.
    let mut segment_indices: Vec<usize> = (0..grouping.segment_count()).collect();
    if value_segments.len() + 1 == segment_indices.len() {
        if let Some(optional) = grouping.optional_segment_index() {
            segment_indices.remove(optional);
        }
    }
    if value_segments.len() != segment_indices.len() {
        let error = SchemaError::SegmentCountMismatch {
            expected: grouping.segment_count(),
            found: value_segments.len(),
        };
        warn!(%error, path, "path does not fit the schema");
        return Err(error);
    }

    let mut values_by_key: HashMap<String, String> = HashMap::new();
    for (value_runs, &segment) in value_segments.iter().zip(&segment_indices) {
        for (run_index, run_values) in value_runs.iter().enumerate() {
            if run_index >= grouping.run_count(segment) {
                break;
            }
            let tokens = grouping.run(segment, run_index);
            let (values, tokens) = align_run(schema, run_values, tokens)?;
            for (value, token) in values.iter().zip(tokens) {
                if token.is_constant() {
                    continue;
                }
                match values_by_key.get(token.key()) {
                    None => {
                        values_by_key.insert(token.key().to_string(), value.clone());
                    }
                    Some(existing) if existing == value => {}
                    Some(existing) => {
                        return Err(SchemaError::ConflictingTokenValue {
                            key: token.key().to_string(),
                            first: existing.clone(),
                            second: value.clone(),
                        });
                    }
                }
            }
        }
    }

    let required = schema.required_keys();
    let missing: Vec<String> = required
        .iter()
        .filter(|key| !values_by_key.contains_key(*key))
        .cloned()
        .collect();
    if !missing.is_empty() {
        let mut found: Vec<String> = values_by_key.keys().cloned().collect();
        found.sort();
        return Err(SchemaError::MissingRequiredKey { missing, found });
    }
    Ok(values_by_key)
}

/// Synthesize a concrete path from a key → value mapping.
///
/// Missing keys are aggregated across the whole template so callers see
/// every gap at once; no partial path is ever returned.
pub(crate) fn path_from_dict(schema: &Schema, values: &HashMap<String, String>) -> Result<String> {
    let mut path = schema.anchor().to_string();
    let mut missing = Vec::new();
    for token in schema.grouping().tokens() {
        if token.is_constant() {
            path.push_str(&token.path_component(token.key()));
        } else if let Some(value) = values.get(token.key()) {
            path.push_str(&token.path_component(value));
        } else if !token.is_optional() {
            missing.push(token.key().to_string());
        }
    }
    if !missing.is_empty() {
        missing.sort();
        missing.dedup();
        warn!(?missing, "cannot synthesize path");
        return Err(SchemaError::UnresolvedKeyOnSynthesis { missing });
    }
    Ok(path)
}

/// Split a concrete path into the same three-level nesting the grouper
/// produces: per segment, the secondary-delimited run, then the
/// tertiary-delimited extension run.
fn split_path(schema: &Schema, path: &str) -> Vec<Vec<Vec<String>>> {
    let style = schema.style();
    let path = path.strip_prefix(schema.anchor()).unwrap_or(path);
    path.split(style.primary())
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut runs = Vec::new();
            let (base, extension) = match segment.split_once(style.tertiary()) {
                Some((base, extension)) => (base, Some(extension)),
                None => (segment, None),
            };
            runs.push(base.split(style.secondary()).map(String::from).collect());
            if let Some(extension) = extension {
                runs.push(extension.split(style.tertiary()).map(String::from).collect());
            }
            runs
        })
        .collect()
}

/// Align one run of path values against one run of tokens.
///
/// When counts differ: under multi-delimited styles the surplus values
/// fold into the slot before the version token, joined with the secondary
/// delimiter; otherwise the run's single optional token is dropped from
/// the comparison. A mismatch that neither rule explains is an error.
fn align_run<'a>(
    schema: &Schema,
    run_values: &[String],
    tokens: &'a [Token],
) -> Result<(Vec<String>, Vec<&'a Token>)> {
    let style = schema.style();
    let expected = tokens.len();
    let mut values: Vec<String> = run_values.to_vec();
    let mut tokens: Vec<&Token> = tokens.iter().collect();
    if values.len() != tokens.len() {
        if style.allow_multidelimited() {
            if let Some(version) = tokens.iter().position(|t| t.is_version()) {
                if version >= 1 && values.len() > tokens.len() {
                    let fold_end = values.len() - (tokens.len() - version);
                    let folded = values[version - 1..fold_end].join(&style.secondary().to_string());
                    values.splice(version - 1..fold_end, [folded]);
                }
            }
        } else if let Some(optional) = tokens.iter().position(|t| t.is_optional()) {
            tokens.remove(optional);
        }
    }
    if values.len() != tokens.len() {
        return Err(SchemaError::SegmentCountMismatch {
            expected,
            found: run_values.len(),
        });
    }
    Ok((values, tokens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;

    const FILENAME_TEMPLATE: &str =
        "/{@show}/{@sequence}/{#product}/{@show}{_@sequence}{_@version}.{#extension}";

    fn schema(template: &str) -> Schema {
        Schema::compile(template, Style::default()).unwrap()
    }

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_synthesis_builds_the_expected_path() {
        let schema = schema(FILENAME_TEMPLATE);
        let path = schema
            .path_from_dict(&values(&[
                ("show", "rrr"),
                ("sequence", "fb2"),
                ("product", "renders"),
                ("version", "v001"),
                ("extension", "exr"),
            ]))
            .unwrap();
        assert_eq!(path, "/rrr/fb2/renders/rrr_fb2_v001.exr");
    }

    #[test]
    fn test_decomposition_recovers_the_mapping() {
        let schema = schema(FILENAME_TEMPLATE);
        let mapping = schema.dict_from_path("/rrr/fb2/renders/rrr_fb2_v001.exr").unwrap();
        assert_eq!(
            mapping,
            values(&[
                ("show", "rrr"),
                ("sequence", "fb2"),
                ("product", "renders"),
                ("version", "v001"),
                ("extension", "exr"),
            ])
        );
    }

    #[test]
    fn test_constant_tokens_never_reach_the_mapping() {
        let schema = schema("/shows/{@show}/{@shot}");
        let mapping = schema.dict_from_path("/shows/rrr/0010").unwrap();
        assert_eq!(mapping, values(&[("show", "rrr"), ("shot", "0010")]));
        assert!(!mapping.contains_key("shows"));
    }

    #[test]
    fn test_synthesis_renders_constants_from_their_literal() {
        let schema = schema("/shows/{@show}/{@shot}");
        let path = schema
            .path_from_dict(&values(&[("show", "rrr"), ("shot", "0010")]))
            .unwrap();
        assert_eq!(path, "/shows/rrr/0010");
    }

    #[test]
    fn test_missing_keys_are_aggregated_on_synthesis() {
        let schema = schema(FILENAME_TEMPLATE);
        let error = schema
            .path_from_dict(&values(&[("show", "rrr"), ("version", "v001")]))
            .unwrap_err();
        assert_eq!(
            error,
            SchemaError::UnresolvedKeyOnSynthesis {
                missing: vec![
                    "extension".to_string(),
                    "product".to_string(),
                    "sequence".to_string(),
                ],
            }
        );
    }

    #[test]
    fn test_single_missing_key_is_named() {
        let schema = schema(FILENAME_TEMPLATE);
        let error = schema
            .path_from_dict(&values(&[
                ("show", "rrr"),
                ("product", "renders"),
                ("version", "v001"),
                ("extension", "exr"),
            ]))
            .unwrap_err();
        // 'sequence' is needed twice but reported once.
        assert_eq!(
            error,
            SchemaError::UnresolvedKeyOnSynthesis {
                missing: vec!["sequence".to_string()],
            }
        );
    }

    #[test]
    fn test_conflicting_repeated_key_fails() {
        let schema = schema(FILENAME_TEMPLATE);
        let error = schema
            .dict_from_path("/rrr/fb2/renders/xxx_fb2_v001.exr")
            .unwrap_err();
        match error {
            SchemaError::ConflictingTokenValue { key, first, second } => {
                assert_eq!(key, "show");
                assert_eq!(first, "rrr");
                assert_eq!(second, "xxx");
            }
            other => panic!("expected a conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_segment_count_mismatch() {
        let schema = schema(FILENAME_TEMPLATE);
        let error = schema.dict_from_path("/rrr/fb2/renders").unwrap_err();
        assert_eq!(
            error,
            SchemaError::SegmentCountMismatch {
                expected: 4,
                found: 3,
            }
        );
    }

    #[test]
    fn test_optional_directory_segment_may_be_absent() {
        let schema = schema("/{@show}/{#product}{?/@user}/{@task}");
        // Present: the optional segment contributes its key.
        let with = schema.dict_from_path("/rrr/renders/jdoe/comp").unwrap();
        assert_eq!(with.get("user").map(String::as_str), Some("jdoe"));
        // Absent: decomposition still succeeds without it.
        let without = schema.dict_from_path("/rrr/renders/comp").unwrap();
        assert!(!without.contains_key("user"));
        assert_eq!(without.get("task").map(String::as_str), Some("comp"));
    }

    #[test]
    fn test_optional_component_token_may_be_absent() {
        let schema = schema("/{@show}/{@asset}{?_@variant}{_@version}.{#extension}");
        let with = schema.dict_from_path("/rrr/tree_autumn_v001.exr").unwrap();
        assert_eq!(with.get("variant").map(String::as_str), Some("autumn"));
        let without = schema.dict_from_path("/rrr/tree_v001.exr").unwrap();
        assert!(!without.contains_key("variant"));
        assert_eq!(without.get("version").map(String::as_str), Some("v001"));
    }

    #[test]
    fn test_run_mismatch_without_an_optional_token_fails() {
        let schema = schema("/{@show}/{@asset}{_@version}.{#extension}");
        let error = schema.dict_from_path("/rrr/tree_autumn_v001.exr").unwrap_err();
        assert_eq!(
            error,
            SchemaError::SegmentCountMismatch {
                expected: 2,
                found: 3,
            }
        );
    }

    #[test]
    fn test_missing_required_key_names_both_sides() {
        let schema = schema("/{@show}/{@asset}{?_@variant}{_@version}.{#extension}");
        // The extension run is missing entirely.
        let error = schema.dict_from_path("/rrr/tree_v001").unwrap_err();
        match error {
            SchemaError::MissingRequiredKey { missing, found } => {
                assert_eq!(missing, vec!["extension".to_string()]);
                assert!(found.contains(&"show".to_string()));
            }
            other => panic!("expected missing keys, got {other:?}"),
        }
    }

    #[test]
    fn test_multidelimited_values_fold_into_the_slot_before_the_version() {
        let template = "/{@show}/{@asset}{_@version[v3]}{_@resolution}.{#extension}";
        let schema =
            Schema::compile(template, Style::default().with_multidelimited(true)).unwrap();
        let mapping = schema
            .dict_from_path("/rrr/old_oak_tree_v001_1080p.exr")
            .unwrap();
        assert_eq!(mapping.get("asset").map(String::as_str), Some("old_oak_tree"));
        assert_eq!(mapping.get("version").map(String::as_str), Some("v001"));
        assert_eq!(mapping.get("resolution").map(String::as_str), Some("1080p"));
    }

    #[test]
    fn test_anchor_round_trips_through_both_directions() {
        let template = format!("//jobs.local/sharename{FILENAME_TEMPLATE}");
        let schema = Schema::compile(&template, Style::default()).unwrap();
        let mapping = values(&[
            ("show", "rrr"),
            ("sequence", "fb2"),
            ("product", "renders"),
            ("version", "v001"),
            ("extension", "exr"),
        ]);
        let path = schema.path_from_dict(&mapping).unwrap();
        assert_eq!(path, "//jobs.local/sharename/rrr/fb2/renders/rrr_fb2_v001.exr");
        assert_eq!(schema.dict_from_path(&path).unwrap(), mapping);
    }
}
