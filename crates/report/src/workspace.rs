//! Workspace persistence
//!
//! Intermediate pipeline state lives in a workspace directory the way
//! the source analysis kept it in a geodatabase: named rasters and
//! count tables, overwritten on every run. Count tables are CSV with a
//! `LABEL` column and one `{zone_field}_{zone_id}` column per zone,
//! mirroring the geodatabase naming convention.

use ndarray::Array2;
use std::fs;
use std::path::{Path, PathBuf};
use terratab_algorithms::ZonalHistogram;
use terratab_core::{Error, Result};

/// A directory of named intermediate rasters and tables
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Open (creating if needed) a workspace directory
    pub fn create<P: AsRef<Path>>(root: P) -> Result<Self> {
        fs::create_dir_all(root.as_ref())?;
        Ok(Self {
            root: root.as_ref().to_path_buf(),
        })
    }

    /// Path of a named raster inside the workspace
    pub fn raster_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.tif", name))
    }

    /// Path of a named table inside the workspace
    pub fn table_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.csv", name))
    }

    /// Persist a zonal count table, overwriting any previous run's copy
    pub fn write_histogram(
        &self,
        name: &str,
        hist: &ZonalHistogram,
        zone_field: &str,
    ) -> Result<PathBuf> {
        let path = self.table_path(name);
        let mut writer = csv::Writer::from_path(&path)
            .map_err(|e| Error::Table(format!("{}: {}", path.display(), e)))?;

        let mut header = vec!["LABEL".to_string()];
        header.extend(hist.zones().iter().map(|z| format!("{}_{}", zone_field, z)));
        writer
            .write_record(&header)
            .map_err(|e| Error::Table(e.to_string()))?;

        for &class in hist.classes() {
            let mut record = vec![class.to_string()];
            record.extend(hist.zones().iter().map(|&z| hist.count(class, z).to_string()));
            writer
                .write_record(&record)
                .map_err(|e| Error::Table(e.to_string()))?;
        }

        writer.flush()?;
        Ok(path)
    }

    /// Materialize a persisted count table back into memory
    pub fn read_histogram(&self, name: &str) -> Result<ZonalHistogram> {
        let path = self.table_path(name);
        let mut reader = csv::Reader::from_path(&path)
            .map_err(|e| Error::Table(format!("{}: {}", path.display(), e)))?;

        let headers = reader
            .headers()
            .map_err(|e| Error::Table(e.to_string()))?
            .clone();

        let zones: Vec<i32> = headers
            .iter()
            .skip(1)
            .map(parse_zone_column)
            .collect::<Result<_>>()?;

        let mut classes = Vec::new();
        let mut rows: Vec<Vec<u64>> = Vec::new();

        for record in reader.records() {
            let record = record.map_err(|e| Error::Table(e.to_string()))?;
            let mut fields = record.iter();

            let label = fields.next().ok_or_else(|| {
                Error::Table(format!("{}: empty record", path.display()))
            })?;
            classes.push(parse_int(label)?);

            let counts: Vec<u64> = fields
                .map(|f| {
                    f.parse::<u64>()
                        .map_err(|_| Error::Table(format!("bad count '{}'", f)))
                })
                .collect::<Result<_>>()?;
            if counts.len() != zones.len() {
                return Err(Error::Table(format!(
                    "{}: record has {} counts for {} zones",
                    path.display(),
                    counts.len(),
                    zones.len()
                )));
            }
            rows.push(counts);
        }

        let mut counts = Array2::zeros((classes.len(), zones.len()));
        for (ci, row) in rows.into_iter().enumerate() {
            for (zi, n) in row.into_iter().enumerate() {
                counts[(ci, zi)] = n;
            }
        }

        ZonalHistogram::from_parts(zones, classes, counts)
    }
}

/// Zone id from a `{zone_field}_{zone_id}` column name
fn parse_zone_column(column: &str) -> Result<i32> {
    let id = column
        .rsplit('_')
        .next()
        .ok_or_else(|| Error::Table(format!("bad zone column '{}'", column)))?;
    parse_int(id).map_err(|_| Error::Table(format!("bad zone column '{}'", column)))
}

fn parse_int(s: &str) -> Result<i32> {
    s.parse::<i32>()
        .map_err(|_| Error::Table(format!("bad integer '{}'", s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample_hist() -> ZonalHistogram {
        ZonalHistogram::from_parts(
            vec![1, 2, 3, 4],
            vec![1, 2, 9],
            array![[5u64, 0, 1, 2], [3, 3, 3, 3], [0, 0, 0, 7]],
        )
        .unwrap()
    }

    #[test]
    fn test_table_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::create(dir.path().join("ex03")).unwrap();

        let path = ws.write_histogram("lu_by_elev", &sample_hist(), "Value").unwrap();
        assert!(path.ends_with("lu_by_elev.csv"));

        let restored = ws.read_histogram("lu_by_elev").unwrap();
        assert_eq!(restored.zones(), &[1, 2, 3, 4]);
        assert_eq!(restored.classes(), &[1, 2, 9]);
        assert_eq!(restored.count(1, 1), 5);
        assert_eq!(restored.count(9, 4), 7);
        assert_eq!(restored.total(), sample_hist().total());
    }

    #[test]
    fn test_overwrite_is_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::create(dir.path()).unwrap();

        ws.write_histogram("t", &sample_hist(), "OBJECTID").unwrap();
        let smaller =
            ZonalHistogram::from_parts(vec![1], vec![1], array![[2u64]]).unwrap();
        ws.write_histogram("t", &smaller, "OBJECTID").unwrap();

        let restored = ws.read_histogram("t").unwrap();
        assert_eq!(restored.zones(), &[1]);
        assert_eq!(restored.total(), 2);
    }

    #[test]
    fn test_missing_table_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::create(dir.path()).unwrap();
        assert!(ws.read_histogram("absent").is_err());
    }
}
