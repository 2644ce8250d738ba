// Integer attribute reading shared by the .tmx and .tsx loaders.
use std::num::ParseIntError;
use std::str::FromStr;

use roxmltree::Node;

use crate::error::MapError;

/// Reads an optional integer attribute. Absent is `None`; present but not an
/// integer is an error, never a silent zero.
pub(crate) fn opt_int<T>(node: Node, name: &'static str) -> Result<Option<T>, MapError>
where
    T: FromStr<Err = ParseIntError>,
{
    node.attribute(name)
        .map(|value| {
            value.trim().parse().map_err(|source| MapError::InvalidAttribute {
                element: node.tag_name().name().to_owned(),
                attribute: name,
                value: value.to_owned(),
                source,
            })
        })
        .transpose()
}

/// Like [`opt_int`], with an absent attribute read as 0.
pub(crate) fn int_or_zero<T>(node: Node, name: &'static str) -> Result<T, MapError>
where
    T: FromStr<Err = ParseIntError> + Default,
{
    Ok(opt_int(node, name)?.unwrap_or_default())
}

/// First element child with the given tag.
pub(crate) fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.is_element() && c.has_tag_name(tag))
}
