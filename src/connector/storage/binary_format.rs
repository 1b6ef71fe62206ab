use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use tracing::debug;

use super::dto::MemberRecord;
use crate::domain::{DomainError, Member, MemberKind};

fn io_error(action: &str, record: usize, e: io::Error) -> DomainError {
    DomainError::storage(format!("Record {}: failed to {}: {}", record, action, e))
}

fn read_string<R: Read>(reader: &mut R) -> io::Result<String> {
    let len = reader.read_u16::<BigEndian>()?;
    let mut buf = vec![0u8; len as usize];
    reader.read_exact(&mut buf)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn write_string<W: Write>(writer: &mut W, value: &str) -> io::Result<()> {
    let len = u16::try_from(value.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("string of {} bytes does not fit a u16 length", value.len()),
        )
    })?;
    writer.write_u16::<BigEndian>(len)?;
    writer.write_all(value.as_bytes())
}

fn read_common<R: Read>(reader: &mut R, id: i64) -> io::Result<MemberRecord> {
    Ok(MemberRecord {
        id,
        nombre: read_string(reader)?,
        apellidos: read_string(reader)?,
        fecha_nacimiento: read_string(reader)?,
        fecha_incorporacion: read_string(reader)?,
        salario: reader.read_f64::<BigEndian>()?,
        pais: read_string(reader)?,
        rol: read_string(reader)?,
        especialidad: None,
        posicion: None,
        dorsal: None,
        altura: None,
        peso: None,
        goles: None,
        partidos_jugados: None,
        minutos_jugados: None,
        imagen: None,
    })
}

fn read_role_fields<R: Read>(
    reader: &mut R,
    kind: MemberKind,
    member: &mut MemberRecord,
) -> io::Result<()> {
    match kind {
        MemberKind::Player => {
            member.posicion = Some(read_string(reader)?);
            member.dorsal = Some(reader.read_i32::<BigEndian>()?);
            member.altura = Some(reader.read_f64::<BigEndian>()?);
            member.peso = Some(reader.read_f64::<BigEndian>()?);
            member.goles = Some(reader.read_i32::<BigEndian>()?);
            member.partidos_jugados = Some(reader.read_i32::<BigEndian>()?);
            member.minutos_jugados = Some(reader.read_i32::<BigEndian>()?);
        }
        MemberKind::Coach => {
            member.especialidad = Some(read_string(reader)?);
        }
    }
    member.imagen = Some(read_string(reader)?).filter(|s| !s.is_empty());
    Ok(())
}

/// Reads the next record, or `None` when no bytes are left.
/// A partial record at the end of the input is an error.
fn read_record<R: BufRead>(
    reader: &mut R,
    record: usize,
) -> Result<Option<MemberRecord>, DomainError> {
    let at_end = reader
        .fill_buf()
        .map_err(|e| io_error("read id", record, e))?
        .is_empty();
    if at_end {
        return Ok(None);
    }

    let id = reader
        .read_i64::<BigEndian>()
        .map_err(|e| io_error("read id", record, e))?;

    let mut member = read_common(reader, id).map_err(|e| io_error("read member", record, e))?;

    let kind = MemberKind::parse(&member.rol)
        .map_err(|e| DomainError::storage(format!("Record {}: {}", record, e)))?;

    read_role_fields(reader, kind, &mut member)
        .map_err(|e| io_error("read role data", record, e))?;

    Ok(Some(member))
}

fn write_record<W: Write>(writer: &mut W, record: &MemberRecord) -> io::Result<()> {
    writer.write_i64::<BigEndian>(record.id)?;
    write_string(writer, &record.nombre)?;
    write_string(writer, &record.apellidos)?;
    write_string(writer, &record.fecha_nacimiento)?;
    write_string(writer, &record.fecha_incorporacion)?;
    writer.write_f64::<BigEndian>(record.salario)?;
    write_string(writer, &record.pais)?;
    write_string(writer, &record.rol)?;

    if record.rol == MemberKind::Player.as_str() {
        write_string(writer, record.posicion.as_deref().unwrap_or_default())?;
        writer.write_i32::<BigEndian>(record.dorsal.unwrap_or_default())?;
        writer.write_f64::<BigEndian>(record.altura.unwrap_or_default())?;
        writer.write_f64::<BigEndian>(record.peso.unwrap_or_default())?;
        writer.write_i32::<BigEndian>(record.goles.unwrap_or_default())?;
        writer.write_i32::<BigEndian>(record.partidos_jugados.unwrap_or_default())?;
        writer.write_i32::<BigEndian>(record.minutos_jugados.unwrap_or_default())?;
    } else {
        write_string(writer, record.especialidad.as_deref().unwrap_or_default())?;
    }

    write_string(writer, record.imagen.as_deref().unwrap_or_default())
}

pub(super) fn read(path: &Path) -> Result<Vec<Member>, DomainError> {
    let file = File::open(path)
        .map_err(|e| DomainError::storage(format!("Failed to open binary file: {}", e)))?;
    let mut reader = BufReader::new(file);

    let mut members = Vec::new();
    while let Some(record) = read_record(&mut reader, members.len() + 1)? {
        members.push(record.into_member(members.len() + 1)?);
    }

    debug!("Read {} members from binary {}", members.len(), path.display());
    Ok(members)
}

pub(super) fn write(path: &Path, members: &[Member]) -> Result<(), DomainError> {
    let file = File::create(path)
        .map_err(|e| DomainError::storage(format!("Failed to create binary file: {}", e)))?;
    let mut writer = BufWriter::new(file);

    for (index, member) in members.iter().enumerate() {
        write_record(&mut writer, &MemberRecord::from_member(member))
            .map_err(|e| io_error("write member", index + 1, e))?;
    }

    writer
        .flush()
        .map_err(|e| DomainError::storage(format!("Failed to flush binary file: {}", e)))?;

    debug!("Wrote {} members to binary {}", members.len(), path.display());
    Ok(())
}
