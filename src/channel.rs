//! Ordered field stream used to checkpoint and ship element state
//!
//! Producers push fields in a fixed order and consumers pull them back in
//! the same order. Every pull checks the field kind and size, so a reader
//! that drifts out of step with its writer fails on the first bad field.

use log::error;
use nalgebra::SMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{FEAError, FEAResult};

/// A single typed entry of a [`FieldStream`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Field {
    Scalar(f64),
    Flag(bool),
    Index(usize),
    Vector(Vec<f64>),
    /// Column-major matrix data
    Matrix {
        rows: usize,
        cols: usize,
        data: Vec<f64>,
    },
}

impl Field {
    fn kind(&self) -> &'static str {
        match self {
            Field::Scalar(_) => "scalar",
            Field::Flag(_) => "flag",
            Field::Index(_) => "index",
            Field::Vector(_) => "vector",
            Field::Matrix { .. } => "matrix",
        }
    }
}

/// Ordered sequence of fields with a read cursor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldStream {
    fields: Vec<Field>,
    #[serde(skip)]
    cursor: usize,
}

impl FieldStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields not yet pulled
    pub fn remaining(&self) -> usize {
        self.fields.len().saturating_sub(self.cursor)
    }

    /// Index of the next field to pull
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn push_scalar(&mut self, value: f64) {
        self.fields.push(Field::Scalar(value));
    }

    pub fn push_flag(&mut self, value: bool) {
        self.fields.push(Field::Flag(value));
    }

    pub fn push_index(&mut self, value: usize) {
        self.fields.push(Field::Index(value));
    }

    pub fn push_vector(&mut self, values: &[f64]) {
        self.fields.push(Field::Vector(values.to_vec()));
    }

    pub fn push_smatrix<const R: usize, const C: usize>(&mut self, m: &SMatrix<f64, R, C>) {
        self.fields.push(Field::Matrix {
            rows: R,
            cols: C,
            data: m.as_slice().to_vec(),
        });
    }

    fn next(&mut self, expected: &'static str) -> FEAResult<Field> {
        let position = self.cursor;
        match self.fields.get(position) {
            Some(field) => {
                self.cursor += 1;
                Ok(field.clone())
            }
            None => Err(mismatch(position, format!("stream exhausted while reading {expected}"))),
        }
    }

    pub fn pull_scalar(&mut self) -> FEAResult<f64> {
        let position = self.cursor;
        match self.next("scalar")? {
            Field::Scalar(v) => Ok(v),
            other => Err(mismatch(position, format!("expected scalar, found {}", other.kind()))),
        }
    }

    pub fn pull_flag(&mut self) -> FEAResult<bool> {
        let position = self.cursor;
        match self.next("flag")? {
            Field::Flag(v) => Ok(v),
            other => Err(mismatch(position, format!("expected flag, found {}", other.kind()))),
        }
    }

    pub fn pull_index(&mut self) -> FEAResult<usize> {
        let position = self.cursor;
        match self.next("index")? {
            Field::Index(v) => Ok(v),
            other => Err(mismatch(position, format!("expected index, found {}", other.kind()))),
        }
    }

    pub fn pull_vector(&mut self, len: usize) -> FEAResult<Vec<f64>> {
        let position = self.cursor;
        match self.next("vector")? {
            Field::Vector(v) if v.len() == len => Ok(v),
            Field::Vector(v) => Err(mismatch(
                position,
                format!("expected vector of length {len}, found length {}", v.len()),
            )),
            other => Err(mismatch(position, format!("expected vector, found {}", other.kind()))),
        }
    }

    pub fn pull_smatrix<const R: usize, const C: usize>(&mut self) -> FEAResult<SMatrix<f64, R, C>> {
        let position = self.cursor;
        match self.next("matrix")? {
            Field::Matrix { rows, cols, data } if rows == R && cols == C && data.len() == R * C => {
                Ok(SMatrix::<f64, R, C>::from_column_slice(&data))
            }
            Field::Matrix { rows, cols, .. } => Err(mismatch(
                position,
                format!("expected {R}x{C} matrix, found {rows}x{cols}"),
            )),
            other => Err(mismatch(position, format!("expected matrix, found {}", other.kind()))),
        }
    }

    /// Encode the stream as bytes
    pub fn to_bytes(&self) -> FEAResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode a stream produced by [`FieldStream::to_bytes`], cursor at the start
    pub fn from_bytes(bytes: &[u8]) -> FEAResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

pub(crate) fn mismatch(position: usize, message: String) -> FEAError {
    error!("field stream mismatch at {position}: {message}");
    FEAError::Channel { position, message }
}
