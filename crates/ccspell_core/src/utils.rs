use byteorder::{BigEndian as BE, ReadBytesExt};
use std::io::{self, Read};

pub fn read_u16<R: Read>(r: &mut R) -> io::Result<u16> { r.read_u16::<BE>() }
pub fn read_u32<R: Read>(r: &mut R) -> io::Result<u32> { r.read_u32::<BE>() }
