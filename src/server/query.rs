//! Turns chart query strings into [ChartRequest]s.
//!
//! `hide` may be repeated and holds comma separated patterns. Each `group=NAME` declares a group
//! whose patterns come from `NAME=a,b` and whose color comes from `NAME_color=COLOR`. Any other
//! key except `width` and `height` sets the color of the category it names.

use std::collections::HashSet;

use crate::pipeline::{
    colors::ColorMap,
    grouping::GroupSpec,
    matcher::{split_patterns, PatternSet},
    Category, ChartRequest, ChartSize,
};

const HIDE: &str = "hide";
const GROUP: &str = "group";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const COLOR_SUFFIX: &str = "_color";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidDimension { key: &'static str, value: String },
}

pub fn parse_chart_query(
    category: Category,
    username: String,
    query: &[(String, String)],
) -> Result<ChartRequest, QueryError> {
    let mut request = ChartRequest::new(category, username);
    request.hide = parse_hide(query);
    (request.groups, request.group_colors) = parse_groups(query);
    request.colors = parse_colors(query, request.groups.as_ref());
    request.size = ChartSize {
        width: parse_dimension(query, WIDTH)?,
        height: parse_dimension(query, HEIGHT)?,
    };
    Ok(request)
}

fn values<'a>(query: &'a [(String, String)], key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    query
        .iter()
        .filter(move |(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn parse_hide(query: &[(String, String)]) -> Option<PatternSet> {
    let hide = values(query, HIDE)
        .flat_map(split_patterns)
        .collect::<PatternSet>();
    (!hide.is_empty()).then_some(hide)
}

fn parse_groups(query: &[(String, String)]) -> (Option<GroupSpec>, Option<ColorMap>) {
    let mut groups = GroupSpec::new();
    let mut colors = ColorMap::new();

    for name in values(query, GROUP).collect::<HashSet<_>>() {
        if let Some(patterns) = values(query, name).last() {
            groups.insert(name.to_owned(), split_patterns(patterns).collect());
        }
        let color_key = format!("{name}{COLOR_SUFFIX}");
        if let Some(color) = values(query, &color_key).last() {
            colors.insert(name.to_owned(), color.to_owned());
        }
    }

    (
        (!groups.is_empty()).then_some(groups),
        (!colors.is_empty()).then_some(colors),
    )
}

fn parse_colors(query: &[(String, String)], groups: Option<&GroupSpec>) -> Option<ColorMap> {
    let colors = query
        .iter()
        .filter(|(key, _)| {
            ![HIDE, GROUP, WIDTH, HEIGHT].contains(&key.as_str())
                && !key.ends_with(COLOR_SUFFIX)
                && !groups.is_some_and(|groups| groups.contains_key(key))
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect::<ColorMap>();
    (!colors.is_empty()).then_some(colors)
}

fn parse_dimension(query: &[(String, String)], key: &'static str) -> Result<Option<u32>, QueryError> {
    values(query, key)
        .last()
        .map(|value| {
            value.parse::<u32>().map_err(|_| QueryError::InvalidDimension {
                key,
                value: value.to_owned(),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use crate::pipeline::{colors::ColorMap, Category, ChartSize};

    use super::{parse_chart_query, QueryError};

    fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_query_sets_nothing() {
        let request = parse_chart_query(Category::Languages, "krios".into(), &[]).unwrap();

        assert_eq!(request.username, "krios");
        assert_eq!(request.hide, None);
        assert_eq!(request.groups, None);
        assert_eq!(request.colors, None);
        assert_eq!(request.group_colors, None);
        assert_eq!(request.size, ChartSize::default());
    }

    #[test]
    fn repeated_hide_values_are_united() {
        let request = parse_chart_query(
            Category::Projects,
            "krios".into(),
            &query(&[("hide", "dotfiles,Scratch"), ("hide", "**-old"), ("hide", "")]),
        )
        .unwrap();

        let hide = request.hide.unwrap();
        assert!(hide.matches("dotfiles"));
        assert!(hide.matches("scratch"));
        assert!(hide.matches("site-old"));
        assert!(!hide.matches("site"));
    }

    #[test]
    fn blank_hide_is_absent() {
        let request =
            parse_chart_query(Category::Editors, "krios".into(), &query(&[("hide", ",")])).unwrap();
        assert_eq!(request.hide, None);
    }

    #[test]
    fn groups_take_patterns_and_colors() {
        let request = parse_chart_query(
            Category::Projects,
            "krios".into(),
            &query(&[
                ("group", "Work"),
                ("group", "Fun"),
                ("Work", "api,web**"),
                ("Work_color", "ff0000"),
                ("Fun", "game"),
                ("wakachart", "00ff00"),
                ("width", "800"),
            ]),
        )
        .unwrap();

        let groups = request.groups.unwrap();
        assert_eq!(groups.len(), 2);
        assert!(groups["Work"].matches("web-frontend"));
        assert!(groups["Fun"].matches("Game"));
        assert_eq!(
            request.group_colors,
            Some(ColorMap::from([("Work".to_owned(), "ff0000".to_owned())]))
        );
        assert_eq!(
            request.colors,
            Some(ColorMap::from([("wakachart".to_owned(), "00ff00".to_owned())]))
        );
        assert_eq!(request.size.width, Some(800));
    }

    #[test]
    fn group_without_patterns_is_not_a_group() {
        let request = parse_chart_query(
            Category::Projects,
            "krios".into(),
            &query(&[("group", "Ghost"), ("Ghost_color", "abc")]),
        )
        .unwrap();

        assert_eq!(request.groups, None);
        assert!(request.group_colors.is_some());
        assert_eq!(request.colors, None);
    }

    #[test]
    fn invalid_dimension_is_rejected() {
        let result = parse_chart_query(
            Category::Languages,
            "krios".into(),
            &query(&[("height", "tall")]),
        );

        assert_eq!(
            result.unwrap_err(),
            QueryError::InvalidDimension {
                key: "height",
                value: "tall".into()
            }
        );
    }

    #[test]
    fn every_request_gets_a_fresh_id() {
        let a = parse_chart_query(Category::Languages, "krios".into(), &[]).unwrap();
        let b = parse_chart_query(Category::Languages, "krios".into(), &[]).unwrap();
        assert_ne!(a.id, b.id);
    }
}
