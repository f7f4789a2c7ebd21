// Automaton file header: 4-byte magic followed by a version byte.

use std::fmt;
use std::io::{self, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::FsaError;

/// Magic number opening every automaton file (`\fsa`).
pub const MAGIC: u32 = 0x5c66_7361;

/// Size of the header in bytes.
pub const HEADER_SIZE: usize = 5;

/// Automaton format version, stored as the fifth header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FsaVersion {
    /// Legacy fixed-width format.
    Fsa5 = 0x05,
    /// Legacy compact format.
    Cfsa = 0xc5,
    /// Compact format with label indexing and v-int addresses.
    Cfsa2 = 0xc6,
}

impl FsaVersion {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x05 => Some(FsaVersion::Fsa5),
            0xc5 => Some(FsaVersion::Cfsa),
            0xc6 => Some(FsaVersion::Cfsa2),
            _ => None,
        }
    }

    pub fn as_byte(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            FsaVersion::Fsa5 => "FSA5",
            FsaVersion::Cfsa => "CFSA",
            FsaVersion::Cfsa2 => "CFSA2",
        }
    }
}

impl fmt::Display for FsaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parsed automaton header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsaHeader {
    pub version: FsaVersion,
}

impl FsaHeader {
    /// Read and validate the header, leaving `reader` positioned at the
    /// start of the version-specific body.
    pub fn read<R: Read + ?Sized>(reader: &mut R) -> Result<Self, FsaError> {
        let magic = reader.read_u32::<BigEndian>()?;
        if magic != MAGIC {
            return Err(FsaError::InvalidMagic);
        }
        let byte = reader.read_u8()?;
        let version = FsaVersion::from_byte(byte).ok_or(FsaError::UnknownVersion(byte))?;
        Ok(FsaHeader { version })
    }

    pub fn write<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u32::<BigEndian>(MAGIC)?;
        writer.write_u8(self.version.as_byte())
    }
}
