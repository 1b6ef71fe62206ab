use std::fs;
use std::path::Path;
use std::str::FromStr;

use quick_xml::se::Serializer;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::dto::MemberRecord;
use crate::domain::{DomainError, Member};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename = "equipo")]
struct TeamDocument {
    #[serde(rename = "personal", default)]
    members: Vec<XmlMember>,
}

/// `<personal>` element. Player figures are text so coaches can leave them empty.
#[derive(Debug, Serialize, Deserialize)]
struct XmlMember {
    #[serde(rename = "@id")]
    id: i64,
    tipo: String,
    nombre: String,
    apellidos: String,
    #[serde(rename = "fechaNacimiento")]
    fecha_nacimiento: String,
    #[serde(rename = "fechaIncorporacion")]
    fecha_incorporacion: String,
    salario: f64,
    pais: String,
    #[serde(default)]
    especialidad: String,
    #[serde(default)]
    posicion: String,
    #[serde(default)]
    dorsal: String,
    #[serde(default)]
    altura: String,
    #[serde(default)]
    peso: String,
    #[serde(default)]
    goles: String,
    #[serde(rename = "partidosJugados", default)]
    partidos_jugados: String,
    #[serde(default)]
    minutos_jugados: String,
    #[serde(default)]
    imagen: String,
}

fn text<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.trim().to_string())
    }
}

fn number<T: FromStr>(value: &str, field: &str, record: usize) -> Result<Option<T>, DomainError>
where
    T::Err: std::fmt::Display,
{
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value.parse::<T>().map(Some).map_err(|e| {
        DomainError::storage(format!(
            "Record {}: invalid {} '{}': {}",
            record, field, value, e
        ))
    })
}

impl XmlMember {
    fn from_member(member: &Member) -> Self {
        let record = MemberRecord::from_member(member);
        Self {
            id: record.id,
            tipo: record.rol,
            nombre: record.nombre,
            apellidos: record.apellidos,
            fecha_nacimiento: record.fecha_nacimiento,
            fecha_incorporacion: record.fecha_incorporacion,
            salario: record.salario,
            pais: record.pais,
            especialidad: record.especialidad.unwrap_or_default(),
            posicion: record.posicion.unwrap_or_default(),
            dorsal: text(record.dorsal),
            altura: text(record.altura),
            peso: text(record.peso),
            goles: text(record.goles),
            partidos_jugados: text(record.partidos_jugados),
            minutos_jugados: text(record.minutos_jugados),
            imagen: record.imagen.unwrap_or_default(),
        }
    }

    fn into_record(self, record: usize) -> Result<MemberRecord, DomainError> {
        Ok(MemberRecord {
            id: self.id,
            nombre: self.nombre,
            apellidos: self.apellidos,
            fecha_nacimiento: self.fecha_nacimiento,
            fecha_incorporacion: self.fecha_incorporacion,
            salario: self.salario,
            pais: self.pais,
            rol: self.tipo,
            especialidad: non_empty(self.especialidad),
            posicion: non_empty(self.posicion),
            dorsal: number(&self.dorsal, "dorsal", record)?,
            altura: number(&self.altura, "altura", record)?,
            peso: number(&self.peso, "peso", record)?,
            goles: number(&self.goles, "goles", record)?,
            partidos_jugados: number(&self.partidos_jugados, "partidosJugados", record)?,
            minutos_jugados: number(&self.minutos_jugados, "minutos_jugados", record)?,
            imagen: non_empty(self.imagen),
        })
    }
}

pub(super) fn read(path: &Path) -> Result<Vec<Member>, DomainError> {
    let content = fs::read_to_string(path)
        .map_err(|e| DomainError::storage(format!("Failed to read XML file: {}", e)))?;

    let document: TeamDocument = quick_xml::de::from_str(&content)
        .map_err(|e| DomainError::storage(format!("Failed to parse XML: {}", e)))?;

    let mut members = Vec::with_capacity(document.members.len());
    for (index, element) in document.members.into_iter().enumerate() {
        members.push(element.into_record(index + 1)?.into_member(index + 1)?);
    }

    debug!("Read {} members from XML {}", members.len(), path.display());
    Ok(members)
}

pub(super) fn write(path: &Path, members: &[Member]) -> Result<(), DomainError> {
    let document = TeamDocument {
        members: members.iter().map(XmlMember::from_member).collect(),
    };

    let mut body = String::new();
    let mut serializer = Serializer::with_root(&mut body, Some("equipo"))
        .map_err(|e| DomainError::storage(format!("Failed to create XML serializer: {}", e)))?;
    serializer.indent(' ', 4);
    document
        .serialize(serializer)
        .map_err(|e| DomainError::storage(format!("Failed to serialize XML: {}", e)))?;

    fs::write(path, format!("{}{}\n", XML_DECLARATION, body))
        .map_err(|e| DomainError::storage(format!("Failed to write XML file: {}", e)))?;

    debug!("Wrote {} members to XML {}", members.len(), path.display());
    Ok(())
}
