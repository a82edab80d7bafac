use crate::{RandomiserError, Result};

/// A logical table of fixed-size records addressed by index.
pub trait RecordStore {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self, index: usize) -> Result<&[u8]>;

    /// Replace every record at once. Each record must keep the table's width
    /// and the record count must not change.
    fn write_all(&mut self, records: Vec<Vec<u8>>) -> Result<()>;
}

/// Records living in an inclusive `[start, end]` byte range of a ROM image.
#[derive(Debug, Clone)]
pub struct DataArray {
    name: &'static str,
    start: usize,
    record_size: usize,
    records: Vec<Vec<u8>>,
}

impl DataArray {
    pub fn read(
        rom: &[u8],
        name: &'static str,
        start: usize,
        end: usize,
        record_size: usize,
    ) -> Result<Self> {
        if record_size == 0 || end < start {
            return Err(RandomiserError::Config(format!(
                "{name}: invalid table bounds 0x{start:06X}..=0x{end:06X}"
            )));
        }
        if end >= rom.len() {
            return Err(RandomiserError::Config(format!(
                "{name}: table ends at 0x{end:06X} but the image is only 0x{:06X} bytes",
                rom.len()
            )));
        }

        // Trailing bytes that do not fill a whole record are left alone.
        let count = (end - start + 1) / record_size;
        let records = rom[start..start + count * record_size]
            .chunks_exact(record_size)
            .map(|chunk| chunk.to_vec())
            .collect();

        Ok(Self {
            name,
            start,
            record_size,
            records,
        })
    }

    /// In-memory table that is not backed by any image offset.
    pub fn from_records(name: &'static str, record_size: usize, records: Vec<Vec<u8>>) -> Result<Self> {
        let mut table = Self {
            name,
            start: 0,
            record_size,
            records: Vec::new(),
        };
        for record in &records {
            table.check_size(record)?;
        }
        table.records = records;
        Ok(table)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn set(&mut self, index: usize, record: Vec<u8>) -> Result<()> {
        self.check_size(&record)?;
        let len = self.records.len();
        let slot = self.records.get_mut(index).ok_or(RandomiserError::RecordIndex {
            table: self.name,
            index,
            len,
        })?;
        *slot = record;
        Ok(())
    }

    /// Copy every record back into the image at the table's original offset.
    pub fn commit(&self, rom: &mut [u8]) -> Result<()> {
        let end = self.start + self.records.len() * self.record_size;
        if end > rom.len() {
            return Err(RandomiserError::Config(format!(
                "{}: cannot write 0x{:06X}..0x{end:06X} into a 0x{:06X} byte image",
                self.name,
                self.start,
                rom.len()
            )));
        }

        for (chunk, record) in rom[self.start..end]
            .chunks_exact_mut(self.record_size)
            .zip(&self.records)
        {
            chunk.copy_from_slice(record);
        }
        Ok(())
    }

    fn check_size(&self, record: &[u8]) -> Result<()> {
        if record.len() != self.record_size {
            return Err(RandomiserError::RecordSize {
                table: self.name,
                expected: self.record_size,
                got: record.len(),
            });
        }
        Ok(())
    }
}

impl RecordStore for DataArray {
    fn len(&self) -> usize {
        self.records.len()
    }

    fn read(&self, index: usize) -> Result<&[u8]> {
        self.records
            .get(index)
            .map(Vec::as_slice)
            .ok_or(RandomiserError::RecordIndex {
                table: self.name,
                index,
                len: self.records.len(),
            })
    }

    fn write_all(&mut self, records: Vec<Vec<u8>>) -> Result<()> {
        if records.len() != self.records.len() {
            return Err(RandomiserError::Config(format!(
                "{}: expected {} records, got {}",
                self.name,
                self.records.len(),
                records.len()
            )));
        }
        for record in &records {
            self.check_size(record)?;
        }
        self.records = records;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_whole_records_only() {
        let rom: Vec<u8> = (0u8..=20).collect();
        let table = DataArray::read(&rom, "test", 2, 12, 4).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.read(0).unwrap(), &[2, 3, 4, 5]);
        assert_eq!(table.read(1).unwrap(), &[6, 7, 8, 9]);
        assert!(matches!(
            table.read(2),
            Err(RandomiserError::RecordIndex { index: 2, len: 2, .. })
        ));
    }

    #[test]
    fn rejects_table_past_end_of_image() {
        let rom = vec![0u8; 8];
        assert!(DataArray::read(&rom, "test", 0, 8, 4).is_err());
    }

    #[test]
    fn commit_writes_back_at_original_offset() {
        let mut rom = vec![0u8; 16];
        let mut table = DataArray::read(&rom, "test", 4, 11, 4).unwrap();
        table
            .write_all(vec![vec![1, 2, 3, 4], vec![5, 6, 7, 8]])
            .unwrap();
        table.commit(&mut rom).unwrap();
        assert_eq!(&rom[..4], &[0, 0, 0, 0]);
        assert_eq!(&rom[4..12], &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(&rom[12..], &[0, 0, 0, 0]);
    }

    #[test]
    fn write_all_checks_record_width() {
        let mut table = DataArray::from_records("test", 2, vec![vec![0, 0]]).unwrap();
        let err = table.write_all(vec![vec![1, 2, 3]]).unwrap_err();
        assert!(matches!(
            err,
            RandomiserError::RecordSize { expected: 2, got: 3, .. }
        ));
    }
}
