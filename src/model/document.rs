//! Document model - the text buffer and its syntax

use std::path::PathBuf;

use ropey::Rope;

use crate::brackets::{
    input_edit, BracketSet, EditDescriptor, LanguageSyntax, LispSyntax, ScanSyntax,
};

/// Document state - the text buffer, file metadata and parsed syntax
pub struct Document {
    /// The text buffer
    pub buffer: Rope,
    /// Path to the file on disk (None for scratch buffers)
    pub file_path: Option<PathBuf>,
    /// Document revision counter (incremented on each edit)
    pub revision: u64,
    /// Tokenizer and syntax tree, refreshed lazily before each pass
    syntax: Box<dyn LanguageSyntax>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("len_bytes", &self.buffer.len_bytes())
            .field("file_path", &self.file_path)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

/// Pick the syntax backend for a bracket set
///
/// Falls back to the plain scanner if the tree-sitter grammar fails to load.
pub fn default_syntax(brackets: BracketSet) -> Box<dyn LanguageSyntax> {
    match LispSyntax::new(brackets) {
        Ok(syntax) => Box::new(syntax),
        Err(e) => {
            tracing::warn!("{}; falling back to plain bracket scanner", e);
            Box::new(ScanSyntax::new(brackets))
        }
    }
}

impl Document {
    /// Create a document with initial text and the default Lisp syntax
    pub fn with_text(text: &str, brackets: BracketSet) -> Self {
        Self::with_syntax(text, default_syntax(brackets))
    }

    /// Create a document with an explicit syntax backend
    pub fn with_syntax(text: &str, syntax: Box<dyn LanguageSyntax>) -> Self {
        Self {
            buffer: Rope::from_str(text),
            file_path: None,
            revision: 0,
            syntax,
        }
    }

    /// Load a document from a file path
    pub fn from_file(path: PathBuf, brackets: BracketSet) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(&path)?;
        let mut doc = Self::with_text(&content, brackets);
        doc.file_path = Some(path);
        Ok(doc)
    }

    pub fn len_bytes(&self) -> usize {
        self.buffer.len_bytes()
    }

    /// Whether `offset` falls on a char boundary inside the buffer
    fn is_boundary(&self, offset: usize) -> bool {
        offset <= self.buffer.len_bytes()
            && self.buffer.char_to_byte(self.buffer.byte_to_char(offset)) == offset
    }

    /// Replace `removed_len` bytes at `offset` with `text`
    ///
    /// Returns the edit notification for the change. The syntax backend is
    /// told about the edit; the reparse happens on the next [`Self::syntax`].
    pub fn replace(
        &mut self,
        offset: usize,
        removed_len: usize,
        text: &str,
    ) -> Result<EditDescriptor, String> {
        let end = offset
            .checked_add(removed_len)
            .ok_or_else(|| "Edit range overflows".to_string())?;
        if !self.is_boundary(offset) || !self.is_boundary(end) {
            return Err(format!(
                "Edit {}..{} is outside the buffer or splits a character (len {})",
                offset,
                end,
                self.buffer.len_bytes()
            ));
        }

        let old = self.buffer.clone();
        let start_char = self.buffer.byte_to_char(offset);
        let end_char = self.buffer.byte_to_char(end);
        self.buffer.remove(start_char..end_char);
        self.buffer.insert(start_char, text);

        let edit = EditDescriptor::new(offset, text.len(), removed_len);
        self.syntax.edit(&input_edit(&old, &self.buffer, &edit));
        self.revision += 1;
        Ok(edit)
    }

    /// The syntax backend, brought up to date with the buffer
    pub fn syntax(&mut self) -> &dyn LanguageSyntax {
        self.syntax.refresh(&self.buffer);
        &*self.syntax
    }
}
