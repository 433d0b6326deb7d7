//! Keyed field lookup inside a block's raw text.
//!
//! Fields look like `"name" "value"`. A missing field is an expected,
//! absent result, never an error; required-field policy lives with the
//! caller.

use glam::Vec3;

/// Locate `"name"` followed by whitespace and a quoted value, scanning
/// forward from byte offset `from`. Returns the value and the offset just
/// past its closing quote.
fn find_field<'a>(block: &'a str, name: &str, from: usize) -> Option<(&'a str, usize)> {
    let key = format!("\"{name}\"");
    let mut search = from;

    while let Some(found) = block[search..].find(&key) {
        let key_end = search + found + key.len();
        let rest = &block[key_end..];
        let trimmed = rest.trim_start();
        let skipped = rest.len() - trimmed.len();

        // At least one whitespace character must separate key and value.
        if skipped > 0 {
            if let Some(value) = trimmed.strip_prefix('"') {
                if let Some(end) = value.find('"') {
                    let start = key_end + skipped + 1;
                    return Some((&block[start..start + end], start + end + 1));
                }
            }
        }

        search = key_end;
    }

    None
}

/// Read the first `"name" "value"` pair anywhere in the block.
pub fn read_field<'a>(block: &'a str, name: &str) -> Option<&'a str> {
    find_field(block, name, 0).map(|(value, _)| value)
}

/// Read a `"name" "value"` pair anchored at the start of the block.
/// Used for identity fields: every solid/side block opens with its id.
pub fn read_field_at_start<'a>(block: &'a str, name: &str) -> Option<&'a str> {
    let rest = block.trim_start().strip_prefix(&format!("\"{name}\""))?;
    let trimmed = rest.trim_start();
    if trimmed.len() == rest.len() {
        return None;
    }
    let value = trimmed.strip_prefix('"')?;
    let end = value.find('"')?;
    Some(&value[..end])
}

/// Read every `"name" "value"` pair in the block, in document order.
pub fn read_fields<'a>(block: &'a str, name: &str) -> Vec<&'a str> {
    let mut values = Vec::new();
    let mut from = 0;
    while let Some((value, end)) = find_field(block, name, from) {
        values.push(value);
        from = end;
    }
    values
}

/// One texture-projection axis: a world-space direction plus a texel shift
/// and scale, parsed from a `[x y z shift] scale` string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvAxis {
    /// Projection direction in map space.
    pub dir: Vec3,
    /// Shift along the axis, in texels.
    pub shift: f32,
    /// Texels-per-unit scale. Parsed but not applied by the projection
    /// formula, matching the behavior of the maps this was built for.
    pub scale: f32,
}

impl UvAxis {
    /// Parse the five numeric tokens out of an axis string, ignoring the
    /// bracket punctuation around the first four.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut values = [0.0f32; 5];
        let mut count = 0;

        for token in raw.split(|c: char| c == '[' || c == ']' || c.is_whitespace()) {
            if token.is_empty() {
                continue;
            }
            if count == 5 {
                return None;
            }
            values[count] = token.parse().ok()?;
            count += 1;
        }

        if count != 5 {
            return None;
        }

        Some(Self {
            dir: Vec3::new(values[0], values[1], values[2]),
            shift: values[3],
            scale: values[4],
        })
    }
}

/// Parse a `"v" "x y z"` vertex row. Exactly three coordinates.
pub fn parse_vertex(raw: &str) -> Option<Vec3> {
    let mut tokens = raw.split_whitespace();
    let x = tokens.next()?.parse().ok()?;
    let y = tokens.next()?.parse().ok()?;
    let z = tokens.next()?.parse().ok()?;
    if tokens.next().is_some() {
        return None;
    }
    Some(Vec3::new(x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_field_anywhere() {
        let block = "\"id\" \"5\"\n\"material\" \"BRICK/BRICKWALL001A\"";
        assert_eq!(read_field(block, "material"), Some("BRICK/BRICKWALL001A"));
        assert_eq!(read_field(block, "id"), Some("5"));
        assert_eq!(read_field(block, "lightmapscale"), None);
    }

    #[test]
    fn test_read_field_requires_separator() {
        // No whitespace between key and value
        assert_eq!(read_field("\"material\"\"BRICK\"", "material"), None);
    }

    #[test]
    fn test_read_field_at_start() {
        let block = "\"id\" \"42\"\n\"material\" \"DEV/GRID\"";
        assert_eq!(read_field_at_start(block, "id"), Some("42"));
        // material is present but not at the start
        assert_eq!(read_field_at_start(block, "material"), None);
    }

    #[test]
    fn test_read_fields_in_order() {
        let block = "\"v\" \"0 0 0\"\n\"v\" \"1 0 0\"\n\"v\" \"1 1 0\"";
        assert_eq!(
            read_fields(block, "v"),
            vec!["0 0 0", "1 0 0", "1 1 0"]
        );
    }

    #[test]
    fn test_uv_axis_parse() {
        let axis = UvAxis::parse("[1 0 0 128] 0.25").unwrap();
        assert_eq!(axis.dir, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(axis.shift, 128.0);
        assert_eq!(axis.scale, 0.25);

        let axis = UvAxis::parse("[0 -1 0 -64.5] 0.5").unwrap();
        assert_eq!(axis.dir, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(axis.shift, -64.5);
    }

    #[test]
    fn test_uv_axis_parse_rejects_bad_input() {
        assert!(UvAxis::parse("[1 0 0] 0.25").is_none());
        assert!(UvAxis::parse("[1 0 0 0 0] 0.25").is_none());
        assert!(UvAxis::parse("[a b c d] e").is_none());
    }

    #[test]
    fn test_parse_vertex() {
        assert_eq!(
            parse_vertex("64 -128 0.5"),
            Some(Vec3::new(64.0, -128.0, 0.5))
        );
        assert_eq!(parse_vertex("1 2"), None);
        assert_eq!(parse_vertex("1 2 3 4"), None);
    }
}
