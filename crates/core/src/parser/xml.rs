//! Element-level readers for opreport XML nodes.
//!
//! Each field of the format is read through one of these helpers so that the
//! required/optional split and the default for every optional value live in
//! one place:
//!
//! | element        | field          | policy            |
//! |----------------|----------------|-------------------|
//! | `symboldetails`| `@id`          | required          |
//! | `detaildata`   | `@line`        | default `"0"`     |
//! | `detaildata`   | `<count>`      | required          |
//! | `symboldata`   | `@id`, `@name` | required          |
//! | `symboldata`   | `@file`        | default `"??"`    |
//! | `symboldata`   | `@line`        | default `"0"`     |
//! | `module`/`binary` | `@name`     | required          |
//! | `module`/`binary` | `<count>`   | default `0`       |
//! | `symbol`       | `@idref`       | required          |
//! | `symbol`       | `<count>`      | required          |

use roxmltree::Node;

use crate::parser::{ReportError, ReportResult};

pub const DEFAULT_FILE: &str = "??";
pub const DEFAULT_LINE: &str = "0";
pub const DEFAULT_COUNT: u64 = 0;

/// Read an attribute the format requires; `id` is reported back for context.
pub fn required_attr<'a>(
    node: Node<'a, '_>,
    attribute: &'static str,
    id: Option<&str>,
) -> ReportResult<&'a str> {
    node.attribute(attribute).ok_or_else(|| ReportError::MissingAttribute {
        element: node.tag_name().name().to_string(),
        attribute,
        id: id.map(str::to_string),
    })
}

/// Read an optional attribute, falling back to `default`.
pub fn attr_or(node: Node<'_, '_>, attribute: &str, default: &str) -> String {
    node.attribute(attribute).unwrap_or(default).to_string()
}

/// First direct `<count>` child, parsed. `Ok(None)` when there is none.
pub fn count_child(node: Node<'_, '_>, id: Option<&str>) -> ReportResult<Option<u64>> {
    let Some(count) = node.children().find(|c| c.is_element() && c.has_tag_name("count")) else {
        return Ok(None);
    };
    let text = count.text().unwrap_or("").trim();
    text.parse::<u64>().map(Some).map_err(|_| ReportError::InvalidCount {
        element: node.tag_name().name().to_string(),
        value: text.to_string(),
        id: id.map(str::to_string),
    })
}

/// `<count>` child that must be present.
pub fn required_count(node: Node<'_, '_>, id: Option<&str>) -> ReportResult<u64> {
    count_child(node, id)?.ok_or_else(|| ReportError::MissingCount {
        element: node.tag_name().name().to_string(),
        id: id.map(str::to_string),
    })
}

/// `<count>` child that defaults to zero when absent.
pub fn count_or_default(node: Node<'_, '_>, id: Option<&str>) -> ReportResult<u64> {
    Ok(count_child(node, id)?.unwrap_or(DEFAULT_COUNT))
}
