/// Default cap on combined object and array nesting.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Configuration shared by the [`Parser`](crate::Parser) and the
/// [`Scanner`](crate::Scanner).
///
/// # Examples
///
/// ```rust
/// use jsonscan::{Lexer, Parser, ParserOptions};
///
/// let options = ParserOptions {
///     max_input_size: Some(1024),
///     use_path_names: true,
///     ..Default::default()
/// };
/// let root = Parser::new(options)
///     .parse_object(&mut Lexer::from_str(r#"{"meta": {}}"#))
///     .unwrap();
/// assert_eq!(root.get_object("meta").unwrap().path_name(), Some("/meta"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParserOptions {
    /// Maximum nesting of objects and arrays. Deeper input fails with
    /// [`SyntaxError::NestingTooDeep`](crate::SyntaxError::NestingTooDeep)
    /// instead of growing the call stack.
    ///
    /// # Default
    ///
    /// [`DEFAULT_MAX_DEPTH`] (512)
    pub max_depth: usize,

    /// Refuse input whose [`Lexer::estimated_size`](crate::Lexer::estimated_size)
    /// exceeds this many bytes, before reading a single token. Input of
    /// unknown size is never refused.
    ///
    /// # Default
    ///
    /// `None`
    pub max_input_size: Option<u64>,

    /// Give every object in the parsed tree a path name (`/meta/vtag`) so
    /// strict accessors can report which field is wrong.
    ///
    /// # Default
    ///
    /// `false`
    pub use_path_names: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_size: None,
            use_path_names: false,
        }
    }
}

/// Layout options for the [`Writer`](crate::Writer).
///
/// The two flags are independent: `sorted` orders object keys, `indented`
/// switches from fully compact output to a pretty-printed layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterOptions {
    /// Emit object keys in sorted order rather than insertion order.
    pub sorted: bool,
    /// Pretty-print. When `false`, no whitespace is added at all.
    pub indented: bool,
    /// Text repeated once per nesting level at the start of each line.
    pub indent: String,
    /// Text written at the start of every line, before the indentation.
    pub leading_indent: String,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self::compact()
    }
}

impl WriterOptions {
    /// No added whitespace, keys in insertion order.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            sorted: false,
            indented: false,
            indent: String::new(),
            leading_indent: String::new(),
        }
    }

    /// Sorted keys, indented by two spaces per level.
    #[must_use]
    pub fn neat() -> Self {
        Self {
            sorted: true,
            indented: true,
            indent: "  ".into(),
            leading_indent: String::new(),
        }
    }
}
