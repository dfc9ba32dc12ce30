//! Attribute value with on-demand typed conversions
//!
//! Raw text is stored unconverted; every `as_*` call parses it again, so a
//! malformed number surfaces at access time, not at parse time.

use super::value::{Vec2, Vec3, Vec4};
use crate::error::AttributeError;

/// A named attribute holding its raw text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    name: String,
    text: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Attribute {
            name: name.into(),
            text: text.into(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Base-10 signed 64-bit integer
    pub fn as_int(&self) -> Result<i64, AttributeError> {
        self.text
            .trim()
            .parse::<i64>()
            .map_err(|_| AttributeError::new(format!("invalid integer value {:?}", self.text)))
    }

    /// Locale-independent decimal number
    pub fn as_float(&self) -> Result<f64, AttributeError> {
        parse_number(&self.text)
    }

    /// `true` exactly for `"true"` and `"1"`
    #[inline]
    pub fn as_bool(&self) -> bool {
        self.text == "true" || self.text == "1"
    }

    /// Read 2d vector formatted `x,y`, or a single scalar for both components.
    /// Only the first comma splits; `y` ends at the next comma, if any.
    pub fn as_vec2(&self) -> Result<Vec2, AttributeError> {
        let text = self.text.as_str();
        match text.split_once(',') {
            None => Ok(Vec2::splat(parse_component(text)?)),
            Some((x, rest)) => {
                let y = rest.split_once(',').map_or(rest, |(y, _)| y);
                Ok(Vec2::new(parse_component(x)?, parse_component(y)?))
            }
        }
    }

    /// Read 3d vector formatted `x,y,z`, or a single scalar for all components
    pub fn as_vec3(&self) -> Result<Vec3, AttributeError> {
        let text = self.text.as_str();
        let Some((x, rest)) = text.split_once(',') else {
            return Ok(Vec3::splat(parse_component(text)?));
        };
        let Some((y, z)) = rest.split_once(',') else {
            return Err(AttributeError::new(format!("invalid vec3 value {:?}", text)));
        };
        Ok(Vec3::new(
            parse_component(x)?,
            parse_component(y)?,
            parse_component(z)?,
        ))
    }

    /// Read 4d vector formatted `x,y,z,w`, or a single scalar for all components
    pub fn as_vec4(&self) -> Result<Vec4, AttributeError> {
        let text = self.text.as_str();
        let Some((x, rest)) = text.split_once(',') else {
            return Ok(Vec4::splat(parse_component(text)?));
        };
        let invalid = || AttributeError::new(format!("invalid vec4 value {:?}", text));
        let (y, rest) = rest.split_once(',').ok_or_else(invalid)?;
        let (z, w) = rest.split_once(',').ok_or_else(invalid)?;
        Ok(Vec4::new(
            parse_component(x)?,
            parse_component(y)?,
            parse_component(z)?,
            parse_component(w)?,
        ))
    }

    /// Read RGBA color normalized to `[0, 1]`. Supported formats:
    /// - `#RRGGBB` or `#RRGGBBAA` hex (alpha defaults to 255)
    /// - anything [`as_vec4`](Self::as_vec4) accepts, in 0..255 units
    pub fn as_color(&self) -> Result<Vec4, AttributeError> {
        let bytes = self.text.as_bytes();
        if bytes.first() != Some(&b'#') {
            return Ok(self.as_vec4()? / 255.0);
        }
        if bytes.len() != 7 && bytes.len() != 9 {
            return Err(AttributeError::new(format!(
                "#RRGGBB or #RRGGBBAA required, got {:?}",
                self.text
            )));
        }
        let channel = |i: usize| ((hex_digit(bytes[i]) << 4) | hex_digit(bytes[i + 1])) as f32;
        let alpha = if bytes.len() == 9 { channel(7) } else { 255.0 };
        Ok(Vec4::new(channel(1), channel(3), channel(5), alpha) / 255.0)
    }
}

/// Hex digit value; invalid digits count as 0
#[inline]
fn hex_digit(b: u8) -> u32 {
    (b as char).to_digit(16).unwrap_or(0)
}

fn parse_number(text: &str) -> Result<f64, AttributeError> {
    let trimmed = text.trim();
    // `inf`/`nan` spellings are accepted by f64::from_str but are not decimals
    let unsigned = trimmed.trim_start_matches(['-', '+']);
    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return Err(AttributeError::new(format!("invalid number {:?}", text)));
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| AttributeError::new(format!("invalid number {:?}", text)))
}

#[inline]
fn parse_component(text: &str) -> Result<f32, AttributeError> {
    parse_number(text).map(|v| v as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(text: &str) -> Attribute {
        Attribute::new("v", text)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_int() {
        assert_eq!(attr("42").as_int().unwrap(), 42);
        assert_eq!(attr(" -7 ").as_int().unwrap(), -7);
        assert!(attr("4.2").as_int().is_err());
        assert!(attr("").as_int().is_err());
        assert!(attr("12abc").as_int().is_err());
    }

    #[test]
    fn test_float() {
        assert_eq!(attr("1.5").as_float().unwrap(), 1.5);
        assert_eq!(attr("-2e3").as_float().unwrap(), -2000.0);
        assert!(attr("abc").as_float().is_err());
        assert!(attr("inf").as_float().is_err());
        assert!(attr("-inf").as_float().is_err());
    }

    #[test]
    fn test_bool() {
        assert!(attr("true").as_bool());
        assert!(attr("1").as_bool());
        assert!(!attr("yes").as_bool());
        assert!(!attr("True").as_bool());
        assert!(!attr("").as_bool());
    }

    #[test]
    fn test_vec2() {
        assert_eq!(attr("1,2").as_vec2().unwrap(), Vec2::new(1.0, 2.0));
        assert_eq!(attr("3").as_vec2().unwrap(), Vec2::splat(3.0));
        assert_eq!(attr("1,2,3").as_vec2().unwrap(), Vec2::new(1.0, 2.0));
        assert!(attr("x,2").as_vec2().is_err());
        assert!(attr("1,").as_vec2().is_err());
    }

    #[test]
    fn test_vec3() {
        assert_eq!(attr("1,2,3").as_vec3().unwrap(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(attr("5").as_vec3().unwrap(), Vec3::splat(5.0));
        assert_eq!(attr("1, 2, 3").as_vec3().unwrap(), Vec3::new(1.0, 2.0, 3.0));
        let err = attr("1,2").as_vec3().unwrap_err();
        assert_eq!(err.message, "invalid vec3 value \"1,2\"");
    }

    #[test]
    fn test_vec4() {
        assert_eq!(attr("1,2,3,4").as_vec4().unwrap(), Vec4::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(attr("0.5").as_vec4().unwrap(), Vec4::splat(0.5));
        assert_eq!(attr("1,2").as_vec4().unwrap_err().message, "invalid vec4 value \"1,2\"");
        assert_eq!(attr("1,2,3").as_vec4().unwrap_err().message, "invalid vec4 value \"1,2,3\"");
    }

    #[test]
    fn test_color_hex() {
        let c = attr("#FF8000").as_color().unwrap();
        assert!(approx(c.x, 1.0) && approx(c.y, 0.502) && approx(c.z, 0.0) && approx(c.w, 1.0));

        let c = attr("#00000080").as_color().unwrap();
        assert_eq!(c, Vec4::new(0.0, 0.0, 0.0, 128.0 / 255.0));
    }

    #[test]
    fn test_color_lenient_digits() {
        // 'G' is not a hex digit and decodes as 0
        let c = attr("#G0FF00").as_color().unwrap();
        assert_eq!(c, Vec4::new(0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn test_color_bad_length() {
        assert!(attr("#FFF").as_color().is_err());
        assert!(attr("").as_color().is_err());
    }

    #[test]
    fn test_color_from_vec4() {
        let c = attr("255,0,51,255").as_color().unwrap();
        assert_eq!(c, Vec4::new(1.0, 0.0, 0.2, 1.0));
        assert_eq!(attr("255").as_color().unwrap(), Vec4::splat(1.0));
    }
}
