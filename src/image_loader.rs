use crate::error::LoadError;
use crate::host::HostIo;
use crate::vm::Vm;
use byteorder::{BigEndian, ReadBytesExt};
use std::fs::File;
use std::io::BufReader;

/// Loads a single big-endian LC-3 image into `vm`'s memory. The first word
/// is the origin; every subsequent word is written at increasing addresses
/// until the file ends or the address space is exhausted. A truncated final
/// byte is silently dropped.
///
/// Returns the origin and the number of words written, for the caller to
/// log.
pub fn load_image<H: HostIo>(vm: &mut Vm<H>, path: &str) -> Result<(u16, usize), LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })?;
    let mut reader = BufReader::new(file);

    let origin = reader.read_u16::<BigEndian>().map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })?;

    let mut written = 0usize;
    let mut address = u32::from(origin);

    loop {
        if address > u32::from(u16::MAX) {
            break;
        }

        match reader.read_u16::<BigEndian>() {
            Ok(word) => {
                vm.load_word(address as u16, word);
                written += 1;
                address += 1;
            }
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(source) => {
                return Err(LoadError::Io {
                    path: path.to_string(),
                    source,
                })
            }
        }
    }

    Ok((origin, written))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::FakeHost;
    use std::io::Write;

    fn write_image(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_origin_and_following_words() {
        let file = write_image(&[0x30, 0x00, 0x00, 0x01, 0xFF, 0xFF]);
        let mut vm = Vm::new(FakeHost::new(&[]));
        let (origin, written) = load_image(&mut vm, file.path().to_str().unwrap()).unwrap();

        assert_eq!(origin, 0x3000);
        assert_eq!(written, 2);
        assert_eq!(vm.read_memory(0x3000), 0x0001);
        assert_eq!(vm.read_memory(0x3001), 0xFFFF);
    }

    #[test]
    fn drops_a_truncated_trailing_byte() {
        let file = write_image(&[0x30, 0x00, 0x00, 0x01, 0xFF]);
        let mut vm = Vm::new(FakeHost::new(&[]));
        let (_, written) = load_image(&mut vm, file.path().to_str().unwrap()).unwrap();

        assert_eq!(written, 1);
        assert_eq!(vm.read_memory(0x3000), 0x0001);
    }

    #[test]
    fn stops_at_the_top_of_the_address_space() {
        // origin 0xFFFF, two words following: only the first can be placed.
        let file = write_image(&[0xFF, 0xFF, 0x12, 0x34, 0x56, 0x78]);
        let mut vm = Vm::new(FakeHost::new(&[]));
        let (origin, written) = load_image(&mut vm, file.path().to_str().unwrap()).unwrap();

        assert_eq!(origin, 0xFFFF);
        assert_eq!(written, 1);
        assert_eq!(vm.read_memory(0xFFFF), 0x1234);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let mut vm = Vm::new(FakeHost::new(&[]));
        let result = load_image(&mut vm, "/nonexistent/path/to/an.obj");
        assert!(result.is_err());
    }

    #[test]
    fn later_image_overwrites_overlapping_region() {
        let first = write_image(&[0x30, 0x00, 0x00, 0x01]);
        let second = write_image(&[0x30, 0x00, 0x00, 0x02]);
        let mut vm = Vm::new(FakeHost::new(&[]));

        load_image(&mut vm, first.path().to_str().unwrap()).unwrap();
        load_image(&mut vm, second.path().to_str().unwrap()).unwrap();

        assert_eq!(vm.read_memory(0x3000), 0x0002);
    }
}
