use bytes::Bytes;

/// Builds TCOD containers in memory for tests.
#[derive(Default)]
pub struct ContainerBuilder {
    sections: Vec<u8>,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(mut self, tag: &[u8; 4], count: i32, value_offset: u32, aux: u32, payload: &[u8]) -> Self {
        let size = (0x20 + payload.len()) as u32;
        self.sections.extend_from_slice(tag);
        self.sections.extend_from_slice(&size.to_be_bytes());
        self.sections.extend_from_slice(&[0; 8]);
        self.sections.extend_from_slice(&count.to_be_bytes());
        self.sections.extend_from_slice(&value_offset.to_be_bytes());
        self.sections.extend_from_slice(&aux.to_be_bytes());
        self.sections.extend_from_slice(&[0; 4]);
        self.sections.extend_from_slice(payload);
        self
    }

    pub fn head(self, entry: u32, functions: &[u32]) -> Self {
        self.section(b"HEAD", functions.len() as i32, entry, 0, &words(functions))
    }

    pub fn code(self, code: &[u32]) -> Self {
        self.section(b"CODE", 0, 0, 0, &words(code))
    }

    pub fn build(self) -> Bytes {
        let total = (0x10 + self.sections.len()) as u32;
        let mut out = Vec::with_capacity(total as usize);
        out.extend_from_slice(b"TCOD");
        out.extend_from_slice(&total.to_be_bytes());
        out.extend_from_slice(&[0; 8]);
        out.extend_from_slice(&self.sections);
        Bytes::from(out)
    }
}

pub fn words(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_be_bytes()).collect()
}
