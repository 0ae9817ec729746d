use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use ndarray::{Array2, ArrayView2};

use crate::error::{Error, Result};

/// Builds an observation matrix from rows of equal length.
pub fn from_rows(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let ncols = rows.first().map_or(0, Vec::len);
    if rows.is_empty() || ncols == 0 {
        return Err(Error::EmptyData);
    }

    for (row, attributes) in rows.iter().enumerate() {
        if attributes.len() != ncols {
            return Err(Error::RaggedRow {
                row,
                expected: ncols,
                found: attributes.len(),
            });
        }
    }

    let data = Array2::from_shape_fn((rows.len(), ncols), |(i, j)| rows[i][j]);
    check_finite(data.view())?;
    Ok(data)
}

/// Fails on the first NaN or infinite attribute, in row-major order.
pub fn check_finite(data: ArrayView2<f64>) -> Result<()> {
    match data.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, column), _)) => Err(Error::NonFinite { row, column }),
        None => Ok(()),
    }
}

/// Reads a comma-separated table where every field is a number.
pub fn read_csv<R: Read>(reader: R, has_headers: bool) -> Result<Array2<f64>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(has_headers)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let row = record
            .iter()
            .enumerate()
            .map(|(column, field)| {
                field.parse::<f64>().map_err(|_| Error::Parse {
                    line,
                    column,
                    value: field.to_string(),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }
    from_rows(&rows)
}

/// Loads a comma-separated file of numbers.
pub fn load_csv<P: AsRef<Path>>(path: P, has_headers: bool) -> Result<Array2<f64>> {
    let file = File::open(path)?;
    read_csv(file, has_headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_from_rows() {
        let data = from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(data, arr2(&[[1.0, 2.0], [3.0, 4.0]]));
    }

    #[test]
    fn test_from_rows_empty() {
        assert!(matches!(from_rows(&[]), Err(Error::EmptyData)));
        assert!(matches!(from_rows(&[vec![]]), Err(Error::EmptyData)));
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(
            err,
            Error::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_read_csv_with_headers() {
        let text = "x,y\n0,0\n0, 1\n10,0\n10,1\n";
        let data = read_csv(text.as_bytes(), true).unwrap();
        assert_eq!(
            data,
            arr2(&[[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]])
        );
    }

    #[test]
    fn test_read_csv_without_headers() {
        let data = read_csv("1.5,2\n-3,4e1\n".as_bytes(), false).unwrap();
        assert_eq!(data, arr2(&[[1.5, 2.0], [-3.0, 40.0]]));
    }

    #[test]
    fn test_read_csv_bad_number() {
        let err = read_csv("1,2\n3,abc\n".as_bytes(), false).unwrap_err();
        match err {
            Error::Parse {
                line,
                column,
                value,
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, 1);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_from_rows_rejects_nan() {
        let err = from_rows(&[vec![0.0, 0.0], vec![f64::NAN, 1.0]]).unwrap_err();
        assert!(matches!(err, Error::NonFinite { row: 1, column: 0 }));
    }

    #[test]
    fn test_read_csv_rejects_non_finite_fields() {
        let err = read_csv("0,0\nNaN,1\n".as_bytes(), false).unwrap_err();
        assert!(matches!(err, Error::NonFinite { row: 1, column: 0 }));

        let err = read_csv("0,0\n10,inf\n".as_bytes(), false).unwrap_err();
        assert!(matches!(err, Error::NonFinite { row: 1, column: 1 }));

        let err = read_csv("-inf,0\n".as_bytes(), false).unwrap_err();
        assert!(matches!(err, Error::NonFinite { row: 0, column: 0 }));
    }

    #[test]
    fn test_read_csv_uneven_records() {
        let err = read_csv("1,2\n3\n".as_bytes(), false).unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
    }

    #[test]
    fn test_load_csv_missing_file() {
        let err = load_csv("/definitely/not/here.csv", false).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
