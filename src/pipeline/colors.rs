use std::collections::BTreeMap;

/// Category name to display color.
pub type ColorMap = BTreeMap<String, String>;

pub const HEX_MARKER: char = '#';

/// Prepends `#` to every bare 3 or 6 digit hex code. Any other value is kept as is.
pub fn normalize(colors: Option<ColorMap>) -> Option<ColorMap> {
    colors.map(|colors| {
        colors
            .into_iter()
            .map(|(name, color)| {
                let color = normalize_color(color);
                (name, color)
            })
            .collect()
    })
}

pub fn normalize_color(color: String) -> String {
    let is_bare_hex =
        matches!(color.len(), 3 | 6) && color.chars().all(|v| v.is_ascii_hexdigit());
    if is_bare_hex {
        format!("{HEX_MARKER}{color}")
    } else {
        color
    }
}

/// Lays `overrides` over `base`. An override whose key equals a base key ignoring case replaces
/// that entry under the base spelling; other overrides are added under their own spelling.
/// A missing side yields the other one unchanged.
pub fn merge(base: Option<ColorMap>, overrides: Option<ColorMap>) -> Option<ColorMap> {
    let (mut merged, overrides) = match (base, overrides) {
        (None, other) | (other, None) => return other,
        (Some(base), Some(overrides)) => (base, overrides),
    };

    let base_keys = merged
        .keys()
        .map(|key| (key.to_lowercase(), key.clone()))
        .collect::<BTreeMap<_, _>>();

    for (name, color) in overrides {
        let key = base_keys.get(&name.to_lowercase()).cloned().unwrap_or(name);
        merged.insert(key, color);
    }
    Some(merged)
}

/// Finds the color for `name` ignoring case.
pub fn resolve<'a>(colors: &'a ColorMap, name: &str) -> Option<&'a str> {
    colors.get(name).map(String::as_str).or_else(|| {
        colors
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, color)| color.as_str())
    })
}
