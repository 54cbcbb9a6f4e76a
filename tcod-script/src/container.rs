use std::fmt;

use byteorder::{BigEndian, ByteOrder};
use bytes::Bytes;

use crate::diag::{Diagnostics, DiagnosticKind, Location};
use crate::error::{LoadError, LoadResult};

pub const MAGIC: &[u8; 4] = b"TCOD";

/// Container header: magic, total size, 8 bytes padding.
pub const CONTAINER_HEADER_LEN: usize = 0x10;
/// Section header: tag, size, 8 bytes padding, count, value offset, aux, 4 bytes padding.
pub const SECTION_HEADER_LEN: usize = 0x20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionTag {
    Ftbl,
    Head,
    Code,
    Strg,
    Vect,
    Giri,
    Gvar,
    Arry,
    Other([u8; 4]),
}

impl SectionTag {
    pub fn from_bytes(raw: [u8; 4]) -> Self {
        match &raw {
            b"FTBL" => SectionTag::Ftbl,
            b"HEAD" => SectionTag::Head,
            b"CODE" => SectionTag::Code,
            b"STRG" => SectionTag::Strg,
            b"VECT" => SectionTag::Vect,
            b"GIRI" => SectionTag::Giri,
            b"GVAR" => SectionTag::Gvar,
            b"ARRY" => SectionTag::Arry,
            _ => SectionTag::Other(raw),
        }
    }

    pub fn as_bytes(&self) -> [u8; 4] {
        match self {
            SectionTag::Ftbl => *b"FTBL",
            SectionTag::Head => *b"HEAD",
            SectionTag::Code => *b"CODE",
            SectionTag::Strg => *b"STRG",
            SectionTag::Vect => *b"VECT",
            SectionTag::Giri => *b"GIRI",
            SectionTag::Gvar => *b"GVAR",
            SectionTag::Arry => *b"ARRY",
            SectionTag::Other(raw) => *raw,
        }
    }
}

impl fmt::Display for SectionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.as_bytes() {
            if b.is_ascii_graphic() {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

/// One tagged section as laid out in the container.
#[derive(Debug, Clone)]
pub struct Section {
    pub tag: SectionTag,
    /// Byte offset of the section header inside the container.
    pub offset: usize,
    /// Declared size, header included.
    pub total_size: u32,
    pub element_count: i32,
    /// FTBL: name buffer offset. HEAD: program entry point.
    pub value_offset: u32,
    pub aux: u32,
    pub payload: Bytes,
}

impl Section {
    /// `element_count` clamped to zero.
    #[inline]
    pub fn count(&self) -> usize {
        self.element_count.max(0) as usize
    }

    fn parse(buf: &Bytes, offset: usize, diags: &mut Diagnostics) -> LoadResult<Self> {
        let header = buf
            .get(offset..offset + SECTION_HEADER_LEN)
            .ok_or(LoadError::TruncatedSectionHeader {
                offset,
                need: SECTION_HEADER_LEN,
                len: buf.len().saturating_sub(offset),
            })?;

        let tag = SectionTag::from_bytes([header[0], header[1], header[2], header[3]]);
        let total_size = BigEndian::read_u32(&header[0x04..]);
        let element_count = BigEndian::read_i32(&header[0x10..]);
        let value_offset = BigEndian::read_u32(&header[0x14..]);
        let aux = BigEndian::read_u32(&header[0x18..]);

        if total_size == 0 {
            return Err(LoadError::ZeroSizedSection { tag, offset });
        }
        let end = offset
            .checked_add(total_size as usize)
            .filter(|end| *end <= buf.len())
            .ok_or(LoadError::SectionOverrun {
                tag,
                offset,
                size: total_size,
                len: buf.len(),
            })?;

        let payload = if (total_size as usize) < SECTION_HEADER_LEN {
            diags.report(
                Location::Container(offset),
                DiagnosticKind::UndersizedSection { size: total_size },
            );
            Bytes::new()
        } else {
            buf.slice(offset + SECTION_HEADER_LEN..end)
        };

        Ok(Section {
            tag,
            offset,
            total_size,
            element_count,
            value_offset,
            aux,
            payload,
        })
    }
}

/// The raw section map of one script file. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct ScriptProgram {
    pub total_size: u32,
    sections: Vec<Section>,
}

impl ScriptProgram {
    /// Split `buf` into its sections.
    ///
    /// A missing magic is only reported; a section whose declared size runs
    /// past the buffer stops loading since nothing after it can be located.
    pub fn load(buf: Bytes, diags: &mut Diagnostics) -> LoadResult<Self> {
        if buf.len() < CONTAINER_HEADER_LEN {
            return Err(LoadError::TruncatedContainerHeader {
                need: CONTAINER_HEADER_LEN,
                len: buf.len(),
            });
        }

        if &buf[..4] != MAGIC {
            diags.report(
                Location::Container(0),
                DiagnosticKind::MissingMagic { found: buf[..4].to_vec() },
            );
        }
        let total_size = BigEndian::read_u32(&buf[4..8]);

        let mut sections: Vec<Section> = Vec::new();
        let mut offset = CONTAINER_HEADER_LEN;
        while offset < total_size as usize {
            let section = Section::parse(&buf, offset, diags)?;
            log::debug!(
                "section {} at 0x{:X}: size=0x{:X} count={} value=0x{:X}",
                section.tag,
                offset,
                section.total_size,
                section.element_count,
                section.value_offset
            );
            offset += section.total_size as usize;

            match sections.iter_mut().find(|s| s.tag == section.tag) {
                Some(slot) => *slot = section,
                None => sections.push(section),
            }
        }

        Ok(Self { total_size, sections })
    }

    pub fn section(&self, tag: SectionTag) -> Option<&Section> {
        self.sections.iter().find(|s| s.tag == tag)
    }

    pub fn require(&self, tag: SectionTag) -> LoadResult<&Section> {
        self.section(tag).ok_or(LoadError::MissingSection(tag))
    }

    /// Sections in container order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::ContainerBuilder;

    #[test]
    fn three_byte_buffer_is_fatal() {
        let mut diags = Diagnostics::new();
        let err = ScriptProgram::load(Bytes::from_static(b"TCO"), &mut diags).unwrap_err();
        assert_eq!(err, LoadError::TruncatedContainerHeader { need: 0x10, len: 3 });
    }

    #[test]
    fn walks_sections_in_order() {
        let buf = ContainerBuilder::new()
            .section(b"HEAD", 1, 0, 0, &[0, 0, 0, 0])
            .section(b"CODE", 0, 0, 0, &[0x0f, 0, 0, 0])
            .section(b"XTRA", 0, 0, 0, &[1, 2, 3])
            .build();
        let mut diags = Diagnostics::new();
        let program = ScriptProgram::load(buf, &mut diags).unwrap();

        assert!(diags.is_empty());
        let tags: Vec<_> = program.sections().iter().map(|s| s.tag).collect();
        assert_eq!(
            tags,
            vec![SectionTag::Head, SectionTag::Code, SectionTag::Other(*b"XTRA")]
        );
        let extra = program.section(SectionTag::Other(*b"XTRA")).unwrap();
        assert_eq!(extra.payload.as_ref(), &[1, 2, 3]);
    }

    #[test]
    fn duplicate_tag_overwrites() {
        let buf = ContainerBuilder::new()
            .section(b"STRG", 0, 0, 0, b"a\0")
            .section(b"STRG", 0, 0, 0, b"b\0")
            .build();
        let mut diags = Diagnostics::new();
        let program = ScriptProgram::load(buf, &mut diags).unwrap();
        assert_eq!(program.sections().len(), 1);
        assert_eq!(program.section(SectionTag::Strg).unwrap().payload.as_ref(), b"b\0");
    }

    #[test]
    fn bad_magic_is_reported_not_fatal() {
        let mut buf = ContainerBuilder::new().section(b"HEAD", 0, 0, 0, &[]).build().to_vec();
        buf[..4].copy_from_slice(b"XXXX");
        let mut diags = Diagnostics::new();
        let program = ScriptProgram::load(Bytes::from(buf), &mut diags).unwrap();
        assert!(program.section(SectionTag::Head).is_some());
        assert!(matches!(
            diags.iter().next().map(|d| &d.kind),
            Some(DiagnosticKind::MissingMagic { .. })
        ));
    }

    #[test]
    fn oversized_section_is_fatal() {
        let mut buf = ContainerBuilder::new().section(b"CODE", 0, 0, 0, &[0; 8]).build().to_vec();
        // bump the section size past the end of the buffer
        buf[0x14..0x18].copy_from_slice(&0x100u32.to_be_bytes());
        let mut diags = Diagnostics::new();
        let err = ScriptProgram::load(Bytes::from(buf), &mut diags).unwrap_err();
        assert!(matches!(
            err,
            LoadError::SectionOverrun { tag: SectionTag::Code, offset: 0x10, size: 0x100, .. }
        ));
    }

    #[test]
    fn zero_sized_section_is_fatal() {
        let mut buf = ContainerBuilder::new().section(b"HEAD", 0, 0, 0, &[]).build().to_vec();
        buf[0x14..0x18].copy_from_slice(&0u32.to_be_bytes());
        let mut diags = Diagnostics::new();
        let err = ScriptProgram::load(Bytes::from(buf), &mut diags).unwrap_err();
        assert_eq!(err, LoadError::ZeroSizedSection { tag: SectionTag::Head, offset: 0x10 });
    }

    #[test]
    fn undersized_section_has_empty_payload() {
        let mut buf = ContainerBuilder::new().section(b"HEAD", 0, 0, 0, &[0; 0x10]).build().to_vec();
        // container ends right after the shrunken section
        buf[4..8].copy_from_slice(&0x20u32.to_be_bytes());
        buf[0x14..0x18].copy_from_slice(&0x10u32.to_be_bytes());
        let mut diags = Diagnostics::new();
        let program = ScriptProgram::load(Bytes::from(buf), &mut diags).unwrap();

        let head = program.require(SectionTag::Head).unwrap();
        assert!(head.payload.is_empty());
        assert_eq!(
            diags.into_vec(),
            vec![crate::diag::Diagnostic::new(
                Location::Container(0x10),
                DiagnosticKind::UndersizedSection { size: 0x10 },
            )]
        );
    }

    #[test]
    fn declared_size_past_buffer_hits_truncated_header() {
        let mut buf = ContainerBuilder::new().section(b"CODE", 0, 0, 0, &[0; 4]).build().to_vec();
        buf[4..8].copy_from_slice(&0x1000u32.to_be_bytes());
        let mut diags = Diagnostics::new();
        let err = ScriptProgram::load(Bytes::from(buf), &mut diags).unwrap_err();
        assert!(matches!(err, LoadError::TruncatedSectionHeader { offset: 0x34, .. }));
    }
}
