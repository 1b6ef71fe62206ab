mod common;

use std::fs;

use common::{assert_same_members, squad};
use newteam::{FileMemberStorage, MemberStorage, Specialty, DEFAULT_IMAGE};
use tempfile::tempdir;

#[tokio::test]
async fn every_format_reproduces_what_it_wrote() {
    let dir = tempdir().expect("tempdir");
    let storage = FileMemberStorage::new();
    let members = squad();

    for name in ["squad.csv", "squad.json", "squad.xml", "squad.bin"] {
        let path = dir.path().join(name);
        storage.write(&path, &members).await.expect(name);
        let read = storage.read(&path).await.expect(name);
        assert_same_members(&members, &read);
    }
}

#[tokio::test]
async fn missing_file_and_missing_parent_are_storage_errors() {
    let dir = tempdir().expect("tempdir");
    let storage = FileMemberStorage::new();

    let err = storage
        .read(&dir.path().join("absent.csv"))
        .await
        .unwrap_err();
    assert!(err.is_storage_error());

    let err = storage
        .read(dir.path())
        .await
        .unwrap_err();
    assert!(err.is_storage_error(), "a directory is not a squad file");

    let err = storage
        .write(&dir.path().join("no/such/dir/squad.json"), &squad())
        .await
        .unwrap_err();
    assert!(err.is_storage_error());
}

#[tokio::test]
async fn unknown_extension_cannot_be_written_but_is_read_as_binary() {
    let dir = tempdir().expect("tempdir");
    let storage = FileMemberStorage::new();

    let err = storage
        .write(&dir.path().join("squad.dat"), &squad())
        .await
        .unwrap_err();
    assert!(err.is_storage_error());
    assert!(!dir.path().join("squad.dat").exists());

    storage
        .write(&dir.path().join("squad.bin"), &squad())
        .await
        .expect("write binary");
    fs::rename(dir.path().join("squad.bin"), dir.path().join("squad.dat")).expect("rename");

    let read = storage
        .read(&dir.path().join("squad.dat"))
        .await
        .expect("binary fallback");
    assert_same_members(&squad(), &read);
}

#[tokio::test]
async fn csv_without_trailing_optional_columns_still_parses() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("legacy.csv");
    fs::write(
        &path,
        "id,nombre,apellidos,fecha_nacimiento,fecha_incorporacion,salario,pais,rol,especialidad,posicion,dorsal,altura,peso,goles,partidos_jugados\n\
         1,Rodolfo,Suárez,1996-04-12,2019-07-01,45000.0,España,Jugador,,DELANTERO,18,1.82,78.5,12,30\n\
         2,Marcelo,Bielsa,1968-11-02,2020-01-15,90000.0,Argentina,Entrenador,ENTRENADOR_PRINCIPAL,,,,,,\n",
    )
    .expect("write csv");

    let members = FileMemberStorage::new().read(&path).await.expect("read");

    assert_eq!(members.len(), 2);
    let stats = members[0].player_stats().expect("player");
    assert_eq!(stats.number, 18);
    assert_eq!(stats.minutes_played, 0);
    assert_eq!(members[0].image(), DEFAULT_IMAGE);
    assert_eq!(members[1].specialty(), Some(Specialty::HeadCoach));
}

#[tokio::test]
async fn csv_header_lists_every_column() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("squad.csv");
    FileMemberStorage::new()
        .write(&path, &squad())
        .await
        .expect("write");

    let content = fs::read_to_string(&path).expect("read back");
    let header = content.lines().next().expect("header");
    assert_eq!(
        header,
        "id,nombre,apellidos,fecha_nacimiento,fecha_incorporacion,salario,pais,rol,especialidad,posicion,dorsal,altura,peso,goles,partidos_jugados,minutos_jugados,imagen"
    );
}

#[tokio::test]
async fn json_ignores_unknown_keys_and_treats_empty_as_absent() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("squad.json");
    fs::write(
        &path,
        r#"[
  {
    "id": 5,
    "nombre": "Sarina",
    "apellidos": "Wiegman",
    "fecha_nacimiento": "1969-10-26",
    "fecha_incorporacion": "2021-09-01",
    "salario": 70000.0,
    "pais": "Países Bajos",
    "rol": "Entrenador",
    "especialidad": "ENTRENADOR_PRINCIPAL",
    "posicion": "",
    "dorsal": "",
    "altura": null,
    "peso": "",
    "goles": "",
    "partidos_jugados": null,
    "minutos_jugados": "",
    "imagen": "",
    "isDeleted": false
  }
]"#,
    )
    .expect("write json");

    let members = FileMemberStorage::new().read(&path).await.expect("read");

    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id(), 5);
    assert!(members[0].is_coach());
    assert_eq!(members[0].image(), DEFAULT_IMAGE);
}

#[tokio::test]
async fn xml_coach_records_have_empty_numeric_elements() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("squad.xml");
    FileMemberStorage::new()
        .write(&path, &squad())
        .await
        .expect("write");

    let content = fs::read_to_string(&path).expect("read back");
    assert!(content.contains("<equipo>"));
    assert!(content.contains(r#"<personal id="2">"#));
    assert!(content.contains("<tipo>Entrenador</tipo>"));
    assert!(content.contains("<fechaNacimiento>1968-11-02</fechaNacimiento>"));
    assert!(content.contains("<partidosJugados>30</partidosJugados>"));

    let coach_block = content
        .split("<personal")
        .find(|block| block.contains("Entrenador"))
        .expect("coach element");
    assert!(coach_block.contains("<dorsal/>") || coach_block.contains("<dorsal></dorsal>"));
}

#[tokio::test]
async fn unknown_role_is_a_storage_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("squad.csv");
    fs::write(
        &path,
        "id,nombre,apellidos,fecha_nacimiento,fecha_incorporacion,salario,pais,rol,especialidad,posicion,dorsal,altura,peso,goles,partidos_jugados\n\
         1,Pepe,Utillero,1970-01-01,2000-01-01,10.0,España,Utillero,,,,,,,\n",
    )
    .expect("write csv");

    let err = FileMemberStorage::new().read(&path).await.unwrap_err();
    assert!(err.is_storage_error());
    assert!(err.to_string().contains("Record 1"));
}

#[tokio::test]
async fn binary_write_truncates_previous_content() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("squad.bin");
    let storage = FileMemberStorage::new();

    storage.write(&path, &squad()).await.expect("first write");
    storage
        .write(&path, &squad()[..1])
        .await
        .expect("second write");

    let read = storage.read(&path).await.expect("read");
    assert_eq!(read.len(), 1);
}

#[tokio::test]
async fn binary_trailing_bytes_are_a_storage_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("squad.bin");
    let storage = FileMemberStorage::new();
    storage.write(&path, &squad()).await.expect("write");

    let mut bytes = fs::read(&path).expect("read bytes");
    bytes.extend_from_slice(&[0xde, 0xad, 0xbe]);
    fs::write(&path, bytes).expect("append");

    let err = storage.read(&path).await.unwrap_err();
    assert!(err.is_storage_error());
    assert!(err.to_string().contains("Record 4"));
}
