// Copyright 2026 The QCC Developers
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not use this file except
// in compliance with the License.You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under the License
// is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express
// or implied. See the License for the specific language governing permissions and limitations under
// the License.

//! Memory-mapped reading of large binary instruction streams, so
//! `Scheduler::run` can stream arbitrarily large inputs without copying
//! the whole file into the process's heap first.

use memmap2::Mmap;
use std::fs::File;
use std::io::{Cursor, Result};
use std::path::Path;

/// Opens `path` read-only and maps it into memory, returning a [`Read`]
/// over the mapping's bytes.
///
/// [`Read`]: std::io::Read
pub fn open_mmap_reader(path: &Path) -> Result<Cursor<Mmap>> {
    let file = File::open(path)?;
    let mmap = unsafe { Mmap::map(&file)? };
    Ok(Cursor::new(mmap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcc_circuit::serialize::binary::{read_header, write_header};
    use std::io::Write as _;

    #[test]
    fn mapped_file_reads_back_the_header_it_was_written_with() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        let mut buf = Vec::new();
        write_header(&mut buf, 42).unwrap();
        tmp.write_all(&buf).unwrap();
        tmp.flush().unwrap();

        let mut reader = open_mmap_reader(tmp.path()).unwrap();
        assert_eq!(read_header(&mut reader).unwrap(), 42);
    }
}
