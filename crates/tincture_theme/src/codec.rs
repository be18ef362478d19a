//! Compact share codec
//!
//! A theme is first written as a flat JSON object of string values keyed by
//! field name (the long form). The token is that object with every key and
//! literal swapped for its short code, brackets and quotes dropped, `:`
//! written as `v`, `,` as `-` and `#` as `X`, then percent-encoded:
//!
//! ```text
//! {"backgroundColor":"#FF112233","opacity":"auto"}  ->  0vXFF112233-20vA
//! ```
//!
//! Decoding accepts the token, the long form or a full share URL. Unknown
//! keys are skipped so newer tokens still decode.

use std::sync::Arc;

use serde_json::{Map, Value};
use tincture_color::{Color, ColorRole, Resolvable};

use crate::capability::DynamicTheme;
use crate::config::ThemeConfig;
use crate::enums::{BackgroundAware, Elevation, Style, ThemeType, Visibility};
use crate::error::{CodecError, Result};
use crate::keys::{value, ThemeKey};
use crate::record::ThemeRecord;

/// Host of the share URL
pub const HOST: &str = "theme.pranavpandey.com";

/// Custom URL scheme accepted for shared themes
pub const SCHEME_CUSTOM: &str = "pranavpandey";

/// Query parameter carrying the token
pub const QUERY: &str = "theme=";

/// Media type of theme files
pub const MIME: &str = "application/vnd.dynamic.theme";

/// Media type of 2D code images
pub const MIME_IMAGE: &str = "image/png";

pub const EXTENSION: &str = ".theme";
pub const EXTENSION_IMAGE: &str = ".png";

/// Default prefix of shared file names
pub const SHARE_PREFIX: &str = "dynamic-theme";

const KEY_SPLIT: &str = "-";
const VALUE_SPLIT: char = 'v';
const HASH_SHORT: char = 'X';

/// A decoded field value
#[derive(Clone, Copy, Debug, PartialEq)]
enum FieldValue {
    Color(Resolvable<Color>),
    Number(Resolvable<u32>),
    BackgroundAware(BackgroundAware),
    Elevation(Elevation),
    Style(Style),
    Type(ThemeType),
    Visibility(Visibility),
}

/// Encodes and decodes theme tokens
#[derive(Clone, Debug, Default)]
pub struct ThemeCodec {
    config: Arc<ThemeConfig>,
}

impl ThemeCodec {
    pub fn new(config: impl Into<Arc<ThemeConfig>>) -> Self {
        Self {
            config: config.into(),
        }
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    /// Field values of `theme` in serialization order, long literals.
    /// Groups the theme does not support are left out.
    fn entries(&self, theme: &dyn DynamicTheme) -> Vec<(ThemeKey, String)> {
        let mut entries = Vec::with_capacity(ThemeKey::ALL.len());

        for key in ThemeKey::ALL {
            let literal = match key {
                ThemeKey::Color(role) => {
                    if !theme.supports_group(role.group()) {
                        continue;
                    }
                    color_literal(theme.color(role, false, false))
                }
                ThemeKey::FontScale => match theme.as_font() {
                    Some(font) => number_literal(font.font_scale(false)),
                    None => continue,
                },
                ThemeKey::CornerRadius => match theme.as_corner() {
                    Some(corner) => number_literal(
                        corner
                            .corner_radius(false)
                            .map(|px| self.config.px_to_dp(px as f32).max(0) as u32),
                    ),
                    None => continue,
                },
                ThemeKey::BackgroundAware => match theme.as_background_aware() {
                    Some(aware) => aware.background_aware(false).value().to_string(),
                    None => continue,
                },
                ThemeKey::Opacity => match theme.as_translucent() {
                    Some(translucent) => number_literal(translucent.opacity(false).map(u32::from)),
                    None => continue,
                },
                ThemeKey::Style => match theme.as_style() {
                    Some(style) => style.style(false).value().to_string(),
                    None => continue,
                },
                ThemeKey::Type => match theme.as_style() {
                    Some(style) => style.theme_type(false).value().to_string(),
                    None => continue,
                },
                ThemeKey::Contrast => match theme.as_background_aware() {
                    Some(aware) => number_literal(aware.contrast(false)),
                    None => continue,
                },
                ThemeKey::Elevation => match theme.as_elevation() {
                    Some(elevation) => elevation.elevation(false).value().to_string(),
                    None => continue,
                },
                ThemeKey::Header => match theme.as_widget() {
                    Some(widget) => widget.header(false).value().to_string(),
                    None => continue,
                },
            };
            entries.push((key, literal));
        }

        entries
    }

    /// Long form as a JSON object
    pub fn to_json(&self, theme: &dyn DynamicTheme) -> Map<String, Value> {
        self.entries(theme)
            .into_iter()
            .map(|(key, literal)| (key.name().to_string(), Value::String(literal)))
            .collect()
    }

    /// Long form, pretty-printed
    pub fn to_json_string(&self, theme: &dyn DynamicTheme) -> String {
        format!("{:#}", Value::Object(self.to_json(theme)))
    }

    /// Shortened token before percent-encoding (the content of a theme file)
    pub fn to_short(&self, theme: &dyn DynamicTheme) -> String {
        let pairs: Vec<String> = self
            .entries(theme)
            .into_iter()
            .map(|(key, literal)| {
                format!("{}{VALUE_SPLIT}{}", key.short(), shorten_value(&literal))
            })
            .collect();
        pairs.join(KEY_SPLIT)
    }

    /// Percent-encoded token, safe for a URL query
    pub fn encode(&self, theme: &dyn DynamicTheme) -> String {
        let token = self.to_short(theme);
        tracing::debug!("ThemeCodec::encode - {} chars", token.len());
        urlencoding::encode(&token).into_owned()
    }

    /// Share URL for `theme`
    pub fn url_for(&self, theme: &dyn DynamicTheme) -> String {
        format!("{}{}", self.config.base_url, self.encode(theme))
    }

    /// Strictly decode into a new record; any malformed field fails the decode
    pub fn try_decode(&self, token: &str) -> Result<ThemeRecord> {
        let mut theme = ThemeRecord::with_config(Arc::clone(&self.config));
        self.try_apply(token, &mut theme)?;
        Ok(theme)
    }

    /// Decode into a new record, recovering from malformed input.
    ///
    /// A malformed token yields an all-`Auto` record.
    pub fn decode(&self, token: &str) -> ThemeRecord {
        let mut theme = ThemeRecord::with_config(Arc::clone(&self.config));
        self.apply(token, &mut theme);
        theme
    }

    /// Strictly apply `token` to `theme`. Every field is validated before any
    /// is written, so `theme` is untouched on error.
    pub fn try_apply(&self, token: &str, theme: &mut dyn DynamicTheme) -> Result<()> {
        let fields = parse_token(token)?
            .into_iter()
            .map(|(key, raw)| parse_field(key, &raw).map(|value| (key, value)))
            .collect::<Result<Vec<_>>>()?;

        for (key, value) in fields {
            self.set_field(theme, key, value);
        }
        Ok(())
    }

    /// Apply `token` to `theme`, recovering from malformed input.
    ///
    /// A malformed field is reset to `Auto` and decoding continues. A token
    /// that cannot be read at all leaves `theme` unmodified and returns `false`.
    pub fn apply(&self, token: &str, theme: &mut dyn DynamicTheme) -> bool {
        let pairs = match parse_token(token) {
            Ok(pairs) => pairs,
            Err(err) => {
                tracing::warn!("Ignoring theme token: {}", err);
                return false;
            }
        };

        for (key, raw) in pairs {
            let value = parse_field(key, &raw).unwrap_or_else(|err| {
                tracing::warn!("Resetting `{}` to auto: {}", key.name(), err);
                auto_field(key)
            });
            self.set_field(theme, key, value);
        }
        true
    }

    fn set_field(&self, theme: &mut dyn DynamicTheme, key: ThemeKey, value: FieldValue) {
        match (key, value) {
            (ThemeKey::Color(role), FieldValue::Color(color)) => {
                if theme.supports_group(role.group()) {
                    theme.set_color(role, color, false);
                }
            }
            (ThemeKey::FontScale, FieldValue::Number(scale)) => {
                if let Some(font) = theme.as_font_mut() {
                    font.set_font_scale(scale);
                }
            }
            (ThemeKey::CornerRadius, FieldValue::Number(dp)) => {
                if let Some(corner) = theme.as_corner_mut() {
                    let px = dp.map(|dp| self.config.dp_to_px(dp as f32).round() as u32);
                    corner.set_corner_radius(px);
                }
            }
            (ThemeKey::Opacity, FieldValue::Number(opacity)) => {
                if let Some(translucent) = theme.as_translucent_mut() {
                    let opacity = opacity.map(|opacity| opacity.min(u8::MAX as u32) as u8);
                    translucent.set_opacity(opacity);
                }
            }
            (ThemeKey::Contrast, FieldValue::Number(contrast)) => {
                if let Some(aware) = theme.as_background_aware_mut() {
                    aware.set_contrast(contrast);
                }
            }
            (ThemeKey::BackgroundAware, FieldValue::BackgroundAware(background_aware)) => {
                if let Some(aware) = theme.as_background_aware_mut() {
                    aware.set_background_aware(background_aware);
                }
            }
            (ThemeKey::Style, FieldValue::Style(style)) => {
                if let Some(attributes) = theme.as_style_mut() {
                    attributes.set_style(style);
                }
            }
            (ThemeKey::Type, FieldValue::Type(theme_type)) => {
                if let Some(attributes) = theme.as_style_mut() {
                    attributes.set_theme_type(theme_type);
                }
            }
            (ThemeKey::Elevation, FieldValue::Elevation(elevation)) => {
                if let Some(attributes) = theme.as_elevation_mut() {
                    attributes.set_elevation(elevation);
                }
            }
            (ThemeKey::Header, FieldValue::Visibility(header)) => {
                if let Some(widget) = theme.as_widget_mut() {
                    widget.set_header(header);
                }
            }
            (key, value) => {
                tracing::debug!("Skipping mismatched field {:?} = {:?}", key, value);
            }
        }
    }

    /// Cheap validity probe: the candidate reads as a token (or long form),
    /// or at least mentions the share host
    pub fn is_valid_token(&self, candidate: &str) -> bool {
        if parse_token(candidate).is_ok() {
            return true;
        }
        let host = host_of(&self.config.base_url).unwrap_or(HOST);
        candidate.to_lowercase().contains(host)
    }

    /// Whether `candidate` is a share URL carrying a token
    pub fn is_theme_url(&self, candidate: &str) -> bool {
        let candidate = candidate.trim();
        let host = host_of(&self.config.base_url).unwrap_or(HOST);
        candidate.contains(QUERY)
            && (candidate.contains(host)
                || candidate.starts_with(&format!("{SCHEME_CUSTOM}://")))
    }
}

impl ThemeRecord {
    /// Percent-encoded share token
    pub fn to_token(&self) -> String {
        ThemeCodec::new(self.shared_config()).encode(self)
    }

    /// Long JSON form, pretty-printed
    pub fn to_json_string(&self) -> String {
        ThemeCodec::new(self.shared_config()).to_json_string(self)
    }

    pub fn share_url(&self) -> String {
        ThemeCodec::new(self.shared_config()).url_for(self)
    }
}

fn color_literal(color: Resolvable<Color>) -> String {
    match color {
        Resolvable::Auto => value::AUTO.to_string(),
        Resolvable::Value(color) => color.to_hex_string(),
    }
}

fn number_literal(number: Resolvable<u32>) -> String {
    match number {
        Resolvable::Auto => value::AUTO.to_string(),
        Resolvable::Value(number) => number.to_string(),
    }
}

fn shorten_value(literal: &str) -> String {
    if let Some(short) = value::shorten(literal) {
        return short.to_string();
    }
    match literal.strip_prefix('#') {
        Some(hex) => format!("{HASH_SHORT}{hex}"),
        None => literal.to_string(),
    }
}

fn host_of(url: &str) -> Option<&str> {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    rest.split(['/', '?']).next().filter(|host| !host.is_empty())
}

/// Normalize a pasted candidate: extract the query value of a share URL, then
/// drop line breaks and whitespace and straighten typographic quotes
pub fn format(candidate: &str) -> String {
    let candidate = candidate.trim();
    let token = match candidate.split_once(QUERY) {
        Some((_, query)) if !query.is_empty() => {
            let query = query.split('&').next().unwrap_or(query);
            urlencoding::decode(query)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| query.to_string())
        }
        _ => candidate.to_string(),
    };

    token
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' | '\u{201E}' => '"',
            c => c,
        })
        .collect()
}

/// `<prefix>-<yyyy-mm-dd-hh-mm-ss><extension>` using the local time
pub fn file_name(prefix: Option<&str>, extension: &str) -> String {
    let stamp = chrono::Local::now().format("%Y-%m-%d-%H-%M-%S");
    format!("{}-{}{}", prefix.unwrap_or(SHARE_PREFIX), stamp, extension)
}

/// Split a token (short form, long form or share URL) into known fields
fn parse_token(token: &str) -> Result<Vec<(ThemeKey, String)>> {
    let formatted = format(token);
    if formatted.is_empty() {
        return Err(CodecError::Empty);
    }
    let decoded = urlencoding::decode(&formatted)
        .map_err(|err| CodecError::Malformed(err.to_string()))?;

    let pairs = if decoded.starts_with('{') {
        parse_json(&decoded)?
    } else {
        parse_short(&decoded)
    };

    let mut fields = Vec::with_capacity(pairs.len());
    for (key, raw) in pairs {
        match ThemeKey::parse(&key) {
            Some(key) => fields.push((key, raw)),
            None => tracing::debug!("Skipping unknown theme key `{}`", key),
        }
    }

    if fields.is_empty() {
        return Err(CodecError::Malformed(format!(
            "no theme fields in `{formatted}`"
        )));
    }
    Ok(fields)
}

fn parse_json(json: &str) -> Result<Vec<(String, String)>> {
    let map: Map<String, Value> = serde_json::from_str(json)?;
    Ok(map
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(raw) => Some((key, raw)),
            Value::Number(number) => Some((key, number.to_string())),
            other => {
                tracing::debug!("Skipping non-scalar value for `{}`: {}", key, other);
                None
            }
        })
        .collect())
}

fn parse_short(token: &str) -> Vec<(String, String)> {
    token
        .split(KEY_SPLIT)
        .filter_map(|pair| pair.split_once(VALUE_SPLIT))
        .filter(|(_, raw)| !raw.is_empty())
        .map(|(key, raw)| (key.to_string(), raw.to_string()))
        .collect()
}

fn parse_color(key: ThemeKey, raw: &str) -> Result<Resolvable<Color>> {
    if value::is_auto(raw) {
        return Ok(Resolvable::Auto);
    }
    let literal = match raw.strip_prefix(HASH_SHORT) {
        Some(hex) => format!("#{hex}"),
        None => raw.to_string(),
    };
    literal
        .parse::<Color>()
        .map(Resolvable::Value)
        .map_err(|source| CodecError::InvalidColor {
            key: key.name(),
            source,
        })
}

fn parse_number(key: ThemeKey, raw: &str) -> Result<Resolvable<u32>> {
    if value::is_auto(raw) {
        return Ok(Resolvable::Auto);
    }
    raw.parse::<u32>()
        .map(Resolvable::Value)
        .map_err(|_| CodecError::InvalidNumber {
            key: key.name(),
            value: raw.to_string(),
        })
}

fn parse_field(key: ThemeKey, raw: &str) -> Result<FieldValue> {
    Ok(match key {
        ThemeKey::Color(_) => FieldValue::Color(parse_color(key, raw)?),
        ThemeKey::FontScale | ThemeKey::CornerRadius | ThemeKey::Opacity | ThemeKey::Contrast => {
            FieldValue::Number(parse_number(key, raw)?)
        }
        ThemeKey::BackgroundAware => FieldValue::BackgroundAware(BackgroundAware::from_value(raw)),
        ThemeKey::Elevation => FieldValue::Elevation(Elevation::from_value(raw)),
        ThemeKey::Style => FieldValue::Style(Style::from_value(raw)),
        ThemeKey::Type => FieldValue::Type(ThemeType::from_value(raw)),
        ThemeKey::Header => FieldValue::Visibility(Visibility::from_value(raw)),
    })
}

fn auto_field(key: ThemeKey) -> FieldValue {
    match key {
        ThemeKey::Color(_) => FieldValue::Color(Resolvable::Auto),
        ThemeKey::FontScale | ThemeKey::CornerRadius | ThemeKey::Opacity | ThemeKey::Contrast => {
            FieldValue::Number(Resolvable::Auto)
        }
        ThemeKey::BackgroundAware => FieldValue::BackgroundAware(BackgroundAware::Auto),
        ThemeKey::Elevation => FieldValue::Elevation(Elevation::Auto),
        ThemeKey::Style => FieldValue::Style(Style::Auto),
        ThemeKey::Type => FieldValue::Type(ThemeType::Auto),
        ThemeKey::Header => FieldValue::Visibility(Visibility::Auto),
    }
}

/// The [`ColorRole`] a color key maps to, if `key` names a color
pub fn color_role(key: &str) -> Option<ColorRole> {
    match ThemeKey::parse(key)? {
        ThemeKey::Color(role) => Some(role),
        _ => None,
    }
}
