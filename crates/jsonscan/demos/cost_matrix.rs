//! Loads a large cost matrix without building a value tree for it.
//!
//! The input looks like this (abridged):
//!
//! ```text
//! {
//!   "meta": {
//!     "vtag": {"tag": string},
//!     "cost_types": [{"name": string, "unit": string}, ...]
//!   },
//!   "costs": {
//!     "<row label>": {"<column label>": number, ...},
//!     ...
//!   }
//! }
//! ```
//!
//! Row and column labels are interned once, each cost is written straight
//! into a flat `Vec<f64>` and only the small `meta` section is materialized
//! with a [`ValueBuilder`]. A document with a million cells therefore costs a
//! million `f64`s rather than a million nested values.
//!
//! Run with
//!
//! ```bash
//! cargo run -p jsonscan --example cost_matrix [path/to/matrix.json]
//! ```

use std::{env, process::ExitCode};

use indexmap::IndexSet;
use jsonscan::{
    Lexer, ParserError, ParserOptions, ScanContext, ScanHandler, Scanner, Value, ValueBuilder,
};

const SAMPLE: &str = r#"{
  "meta": {
    "vtag": {"tag": "2024-06-01T00:00:00Z"},
    "cost_types": [{"name": "routing", "unit": "ms"}]
  },
  "costs": {
    "edge-1": {"edge-1": 0, "edge-2": 12.5, "core": 4},
    "edge-2": {"edge-1": 12.5, "edge-2": 0, "core": 3.25},
    "core": {"edge-1": 4, "edge-2": 3.25, "core": 0}
  }
}"#;

#[derive(Debug, Default)]
struct CostMatrix {
    labels: IndexSet<String>,
    cells: Vec<(usize, usize, f64)>,
    meta: ValueBuilder,
}

impl CostMatrix {
    fn in_meta(ctx: &ScanContext) -> bool {
        ctx.key_at(0) == Some("meta")
    }

    fn intern(&mut self, label: Option<&str>) -> usize {
        self.labels
            .insert_full(label.unwrap_or_default().to_owned())
            .0
    }

    /// Dense row-major matrix; missing cells are NaN.
    fn dense(&self) -> Vec<f64> {
        let n = self.labels.len();
        let mut matrix = vec![f64::NAN; n * n];
        for &(row, column, cost) in &self.cells {
            matrix[row * n + column] = cost;
        }
        matrix
    }
}

impl ScanHandler for CostMatrix {
    fn enter_dictionary(&mut self, ctx: &ScanContext) -> Result<(), ParserError> {
        if Self::in_meta(ctx) {
            self.meta.enter_dictionary(ctx)?;
        }
        Ok(())
    }

    fn leave_dictionary(&mut self, ctx: &ScanContext) -> Result<(), ParserError> {
        if Self::in_meta(ctx) {
            self.meta.leave_dictionary(ctx)?;
        }
        Ok(())
    }

    fn got_dictionary_key(&mut self, ctx: &ScanContext, key: &str) -> Result<(), ParserError> {
        if Self::in_meta(ctx) && ctx.depth() > 1 {
            self.meta.got_dictionary_key(ctx, key)?;
        }
        Ok(())
    }

    fn got_dictionary_value(&mut self, ctx: &ScanContext, value: Value) -> Result<(), ParserError> {
        if Self::in_meta(ctx) && ctx.depth() > 1 {
            return self.meta.got_dictionary_value(ctx, value);
        }
        if ctx.key_at(0) != Some("costs") {
            return Ok(());
        }
        if ctx.dictionary_depth() != 3 {
            return Err(ctx.abort(format!("unexpected value at {}", ctx.key_path())));
        }
        let Some(cost) = value.as_f64() else {
            return Err(ctx.abort(format!("cost at {} is {}", ctx.key_path(), value.type_tag())));
        };
        let row = self.intern(ctx.key_at(1));
        let column = self.intern(ctx.key_at(2));
        self.cells.push((row, column, cost));
        Ok(())
    }

    fn enter_array(&mut self, ctx: &ScanContext) -> Result<(), ParserError> {
        if Self::in_meta(ctx) {
            self.meta.enter_array(ctx)?;
        }
        Ok(())
    }

    fn leave_array(&mut self, ctx: &ScanContext) -> Result<(), ParserError> {
        if Self::in_meta(ctx) {
            self.meta.leave_array(ctx)?;
        }
        Ok(())
    }

    fn got_array_value(&mut self, ctx: &ScanContext, value: Value) -> Result<(), ParserError> {
        if Self::in_meta(ctx) {
            self.meta.got_array_value(ctx, value)?;
        }
        Ok(())
    }
}

fn load(lexer: &mut Lexer<'_>) -> Result<CostMatrix, ParserError> {
    let mut matrix = CostMatrix::default();
    let options = ParserOptions {
        max_input_size: Some(1 << 30),
        ..Default::default()
    };
    Scanner::new(options).scan(lexer, &mut matrix)?;
    Ok(matrix)
}

#[cfg_attr(test, allow(dead_code))]
fn main() -> ExitCode {
    let result = match env::args().nth(1) {
        Some(path) => match Lexer::from_file(&path) {
            Ok(mut lexer) => load(&mut lexer),
            Err(err) => {
                eprintln!("cannot open {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => load(&mut Lexer::from_str(SAMPLE).with_name("sample")),
    };
    let mut matrix = match result {
        Ok(matrix) => matrix,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let meta = matrix.meta.take().unwrap_or_default();
    match meta.to_neat_string() {
        Ok(text) => println!("meta: {text}"),
        Err(err) => eprintln!("cannot print meta: {err}"),
    }

    let dense = matrix.dense();
    let n = matrix.labels.len();
    println!("{n} labels, {} cells", matrix.cells.len());
    for (row, label) in matrix.labels.iter().enumerate() {
        let line: Vec<String> = dense[row * n..(row + 1) * n]
            .iter()
            .map(|cost| format!("{cost:>6}"))
            .collect();
        println!("{label:>8} {}", line.join(" "));
    }
    ExitCode::SUCCESS
}
