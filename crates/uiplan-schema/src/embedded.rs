/// A JSON Schema compiled into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedSchema {
    pub id: &'static str,
    pub json: &'static str,
}
