use crate::container::SectionTag;

/// Structural failures. Loading of the affected file stops at the first one.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("container header truncated: need 0x{need:X} bytes, buffer has 0x{len:X}")]
    TruncatedContainerHeader { need: usize, len: usize },

    #[error("section header at 0x{offset:X} truncated: need 0x{need:X} bytes, buffer has 0x{len:X}")]
    TruncatedSectionHeader { offset: usize, need: usize, len: usize },

    #[error("section {tag} at 0x{offset:X} declares size 0x{size:X}, past the buffer end (0x{len:X})")]
    SectionOverrun {
        tag: SectionTag,
        offset: usize,
        size: u32,
        len: usize,
    },

    #[error("section {tag} at 0x{offset:X} declares a zero size")]
    ZeroSizedSection { tag: SectionTag, offset: usize },

    #[error("mandatory section {0} is missing")]
    MissingSection(SectionTag),

    #[error("two-word instruction at word 0x{position:x} has no trailing word (CODE holds {words} words)")]
    TruncatedImmediate { position: u32, words: usize },
}

pub type LoadResult<T> = std::result::Result<T, LoadError>;
