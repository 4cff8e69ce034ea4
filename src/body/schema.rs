use crate::body::{Attribute, Block};

/// Attribute accepted by a [`BodySchema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSchema {
    pub name: &'static str,
    pub required: bool,
}

impl AttributeSchema {
    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }

    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }
}

/// Block type accepted by a [`BodySchema`], with the names of its labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeaderSchema {
    pub block_type: &'static str,
    pub label_names: &'static [&'static str],
}

/// The attributes and block types a decoder extracts from a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BodySchema {
    pub attributes: &'static [AttributeSchema],
    pub blocks: &'static [BlockHeaderSchema],
}

impl BodySchema {
    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn block(&self, block_type: &str) -> Option<&BlockHeaderSchema> {
        self.blocks.iter().find(|b| b.block_type == block_type)
    }
}

/// Content matched by a schema.
///
/// Attributes are kept in the order the schema declares them; blocks in source
/// order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BodyContent {
    pub attributes: Vec<Attribute>,
    pub blocks: Vec<Block>,
}

impl BodyContent {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Removes and returns the attribute named `name`, if it was matched.
    pub fn take_attribute(&mut self, name: &str) -> Option<Attribute> {
        let index = self.attributes.iter().position(|a| a.name == name)?;
        Some(self.attributes.remove(index))
    }

    pub fn blocks_of_type<'a>(&'a self, block_type: &'a str) -> impl Iterator<Item = &'a Block> {
        self.blocks.iter().filter(move |b| b.block_type == block_type)
    }
}
