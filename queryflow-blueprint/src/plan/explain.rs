use std::borrow::Cow;
use std::default::Default;
use std::io::{BufWriter, Error, ErrorKind, Write};

use ptree::print_config::UTF_CHARS;
use ptree::{write_tree_with, PrintConfig, Style, TreeItem};

use crate::plan::Blueprint;

impl<'a> TreeItem for &'a Blueprint {
    type Child = Self;

    fn write_self<W: Write>(&self, f: &mut W, style: &Style) -> std::io::Result<()> {
        write!(f, "{}", style.paint(self))
    }

    fn children(&self) -> Cow<[Self::Child]> {
        Cow::from(self.children.iter().collect::<Vec<&'a Blueprint>>())
    }
}

/// Writes the blueprint as a tree, one node per line with its stats and strictness.
pub fn explain<W: Write>(blueprint: &Blueprint, output: &mut W) -> std::io::Result<()> {
    let config = PrintConfig {
        indent: 3,
        characters: UTF_CHARS.into(),
        ..Default::default()
    };
    write_tree_with(&blueprint, output, &config)
}

pub fn explain_to_string(blueprint: &Blueprint) -> std::io::Result<String> {
    let mut buf = BufWriter::new(Vec::new());
    explain(blueprint, &mut buf)?;

    let bytes = buf.into_inner()?;
    String::from_utf8(bytes).map_err(|e| Error::new(ErrorKind::InvalidData, e))
}
