/// Naming and retention policy for [`flatten_all`](crate::flatten_all).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FlattenConfig {
    recursive: bool,
    composite_names: bool,
    keep_nested_columns: bool,
}

impl FlattenConfig {
    pub fn builder() -> FlattenConfigBuilder {
        FlattenConfigBuilder::default()
    }

    pub fn new() -> Self {
        Self::default()
    }

    /// Keep flattening until no nested column remains.
    pub fn recursive(&self) -> bool {
        self.recursive
    }

    /// Prefix child columns with their parent's name, e.g. `person.age`.
    pub fn composite_names(&self) -> bool {
        self.composite_names
    }

    /// Keep each nested column alongside its flattened children.
    pub fn keep_nested_columns(&self) -> bool {
        self.keep_nested_columns
    }

    pub fn into_builder(self) -> FlattenConfigBuilder {
        FlattenConfigBuilder(self)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, derive_more::Into)]
pub struct FlattenConfigBuilder(FlattenConfig);

impl FlattenConfigBuilder {
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.0.recursive = recursive;
        self
    }

    pub fn composite_names(mut self, composite_names: bool) -> Self {
        self.0.composite_names = composite_names;
        self
    }

    pub fn keep_nested_columns(mut self, keep: bool) -> Self {
        self.0.keep_nested_columns = keep;
        self
    }

    pub fn build(self) -> FlattenConfig {
        self.0
    }
}
