use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use costume_core::*;

const CARRIER_IMAGE: &str = "tests/images/plain/carrier-image.jpg";
const CARRIER_WITH_THUMBNAIL: &str = "tests/images/plain/carrier-with-thumbnail.jpg";

/// Copies a fixture into a fresh temp dir, returns the dir and the copy.
fn stage(fixture: &str) -> (TempDir, PathBuf) {
    let out_dir = TempDir::new().expect("Failed to create temporary directory");
    let image = out_dir.path().join("hero.jpg");
    fs::copy(fixture, &image).expect("Failed to copy fixture");
    (out_dir, image)
}

fn write_data(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write data file");
    path
}

fn pseudo_random_bytes(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x2545_F491;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

#[test]
fn should_round_trip_costume_data() -> Result<()> {
    for payload in [b"".to_vec(), b"hello".to_vec(), pseudo_random_bytes(3 << 20)] {
        let (out_dir, image) = stage(CARRIER_IMAGE);
        let data = write_data(out_dir.path(), "costume.dat", &payload);
        let restored = out_dir.path().join("restored.dat");

        pack(&image, &data)?;
        unpack(&image, &restored)?;

        assert_eq!(fs::read(&restored).unwrap(), payload);
    }

    Ok(())
}

#[test]
fn packed_image_region_is_identical_to_the_original() -> Result<()> {
    let original = fs::read(CARRIER_IMAGE).unwrap();
    let (out_dir, image) = stage(CARRIER_IMAGE);
    let data = write_data(out_dir.path(), "costume.dat", &pseudo_random_bytes(4096));

    pack(&image, &data)?;

    let packed = fs::read(&image).unwrap();
    assert_eq!(find_image_end(&packed)?, original.len());
    assert_eq!(Container::parse(&packed)?.image(), original.as_slice());

    Ok(())
}

#[test]
fn should_keep_a_byte_identical_backup() -> Result<()> {
    let original = fs::read(CARRIER_IMAGE).unwrap();
    let (out_dir, image) = stage(CARRIER_IMAGE);
    let data = write_data(out_dir.path(), "costume.dat", b"costume");

    pack(&image, &data)?;

    let backup = out_dir.path().join("hero.jpg.bak");
    assert_eq!(fs::read(backup).unwrap(), original);

    Ok(())
}

#[test]
fn second_pack_fails_and_leaves_the_file_alone() -> Result<()> {
    let (out_dir, image) = stage(CARRIER_IMAGE);
    let data = write_data(out_dir.path(), "costume.dat", b"costume");
    pack(&image, &data)?;
    let packed = fs::read(&image).unwrap();

    // a fresh backup name, so only the footer check can stop it
    let options = PackOptions {
        backup_policy: BackupPolicy::Overwrite,
        ..PackOptions::default()
    };
    let result = pack_with_options(&image, &data, &options);

    assert!(matches!(result, Err(CostumeError::AlreadyPacked)));
    assert_eq!(fs::read(&image).unwrap(), packed);

    Ok(())
}

#[test]
fn unpack_of_plain_image_reports_no_payload() {
    let (out_dir, image) = stage(CARRIER_IMAGE);
    let data = out_dir.path().join("costume.dat");

    let result = unpack(&image, &data);

    assert!(matches!(result, Err(CostumeError::NoPayload)));
    assert!(!data.exists());
}

#[test]
fn unpack_leaves_an_existing_data_file_alone_on_failure() {
    let (out_dir, image) = stage(CARRIER_IMAGE);
    let data = write_data(out_dir.path(), "costume.dat", b"keep me");

    assert!(matches!(unpack(&image, &data), Err(CostumeError::NoPayload)));
    assert_eq!(fs::read(&data).unwrap(), b"keep me");
}

#[test]
fn unpack_overwrites_the_data_file() -> Result<()> {
    let (out_dir, image) = stage(CARRIER_IMAGE);
    let data = write_data(out_dir.path(), "costume.dat", b"new costume");
    pack(&image, &data)?;

    let target = write_data(out_dir.path(), "target.dat", b"a much longer previous content");
    unpack(&image, &target)?;

    assert_eq!(fs::read(&target).unwrap(), b"new costume");

    Ok(())
}

#[test]
fn malformed_input_fails_before_any_write() {
    for content in [&b"definitely not a jpeg"[..], &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10][..]] {
        let out_dir = TempDir::new().unwrap();
        let image = write_data(out_dir.path(), "broken.jpg", content);
        let data = write_data(out_dir.path(), "costume.dat", b"costume");
        let target = out_dir.path().join("target.dat");

        assert!(matches!(
            pack(&image, &data),
            Err(CostumeError::MalformedContainer { .. })
        ));
        assert!(matches!(
            unpack(&image, &target),
            Err(CostumeError::MalformedContainer { .. })
        ));

        assert_eq!(fs::read(&image).unwrap(), content);
        assert!(!out_dir.path().join("broken.jpg.bak").exists());
        assert!(!target.exists());
        assert_eq!(fs::read_dir(out_dir.path()).unwrap().count(), 2);
    }
}

#[test]
fn should_pack_the_minimal_scenario_byte_for_byte() -> Result<()> {
    let out_dir = TempDir::new().unwrap();
    let image = write_data(out_dir.path(), "minimal.jpg", &[0xFF, 0xD8, 0xFF, 0xD9]);
    let data = write_data(out_dir.path(), "minimal.dat", b"hello");

    pack(&image, &data)?;

    assert_eq!(
        fs::read(&image).unwrap(),
        [0xFF, 0xD8, 0xFF, 0xD9, 0x00, 0x00, 0x00, 0x05, b'h', b'e', b'l', b'l', b'o']
    );

    let restored = out_dir.path().join("restored.dat");
    unpack(&image, &restored)?;
    assert_eq!(fs::read(&restored).unwrap(), b"hello");

    Ok(())
}

#[test]
fn should_see_past_an_exif_thumbnail() -> Result<()> {
    let original = fs::read(CARRIER_WITH_THUMBNAIL).unwrap();
    assert_eq!(find_image_end(&original)?, original.len());

    let (out_dir, image) = stage(CARRIER_WITH_THUMBNAIL);
    let data = write_data(out_dir.path(), "costume.dat", b"thumbnail safe");
    let restored = out_dir.path().join("restored.dat");

    pack(&image, &data)?;
    unpack(&image, &restored)?;

    assert_eq!(fs::read(&restored).unwrap(), b"thumbnail safe");

    Ok(())
}

#[test]
fn existing_backup_is_protected_by_default() -> Result<()> {
    let (out_dir, image) = stage(CARRIER_IMAGE);
    let data = write_data(out_dir.path(), "costume.dat", b"costume");
    let backup = write_data(out_dir.path(), "hero.jpg.bak", b"an older backup");
    let original = fs::read(&image).unwrap();

    let result = pack(&image, &data);

    assert!(matches!(result, Err(CostumeError::BackupExists { path }) if path == backup));
    assert_eq!(fs::read(&image).unwrap(), original);
    assert_eq!(fs::read(&backup).unwrap(), b"an older backup");

    Ok(())
}

#[test]
fn overwrite_policy_replaces_an_existing_backup() -> Result<()> {
    let (out_dir, image) = stage(CARRIER_IMAGE);
    let data = write_data(out_dir.path(), "costume.dat", b"costume");
    write_data(out_dir.path(), "hero.jpg.bak", b"an older backup");
    let original = fs::read(&image).unwrap();

    let options = PackOptions {
        backup_policy: BackupPolicy::Overwrite,
        ..PackOptions::default()
    };
    let backup = pack_with_options(&image, &data, &options)?;

    assert_eq!(fs::read(backup).unwrap(), original);

    Ok(())
}

#[test]
fn timestamped_policy_leaves_older_backups_in_place() -> Result<()> {
    let (out_dir, image) = stage(CARRIER_IMAGE);
    let data = write_data(out_dir.path(), "costume.dat", b"costume");
    write_data(out_dir.path(), "hero.jpg.bak", b"an older backup");

    let options = PackOptions {
        backup_policy: BackupPolicy::Timestamped,
        ..PackOptions::default()
    };
    let backup = pack_with_options(&image, &data, &options)?;

    assert_ne!(backup, out_dir.path().join("hero.jpg.bak"));
    assert_eq!(fs::read(&backup).unwrap(), fs::read(CARRIER_IMAGE).unwrap());
    assert_eq!(
        fs::read(out_dir.path().join("hero.jpg.bak")).unwrap(),
        b"an older backup"
    );

    Ok(())
}

#[test]
fn missing_files_are_io_errors() {
    let out_dir = TempDir::new().unwrap();
    let missing = out_dir.path().join("missing.jpg");
    let data = write_data(out_dir.path(), "costume.dat", b"costume");

    let err = pack(&missing, &data).unwrap_err();
    assert!(err.is_io());
    assert!(matches!(err, CostumeError::IoError { ref path, .. } if path == &missing));

    let (_dir, image) = stage(CARRIER_IMAGE);
    let err = pack(&image, &out_dir.path().join("missing.dat")).unwrap_err();
    assert!(err.is_io());

    let err = unpack(&missing, &data).unwrap_err();
    assert!(err.is_io());
}

#[test]
fn inspect_reports_the_embedded_payload() -> Result<()> {
    let (out_dir, image) = stage(CARRIER_WITH_THUMBNAIL);
    let data = write_data(out_dir.path(), "costume.dat", &[7u8; 100]);

    let before = inspect(&image)?;
    assert_eq!(before.payload_len, None);
    assert_eq!(before.image_len, 577);

    pack(&image, &data)?;
    let after = inspect(&image)?;

    assert_eq!(after.payload_len, Some(100));
    assert_eq!(after.image_len, 577);
    assert_eq!(after.file_len, 577 + 4 + 100);
    assert_eq!(after.segment_count, before.segment_count);
    assert_eq!(after.unrecognized_len, 0);

    Ok(())
}

#[test]
fn inspect_reports_an_app13_costume_record() -> Result<()> {
    // carrier image with an APP13 IPTC record right after APP0
    let plain = fs::read(CARRIER_IMAGE).unwrap();
    let app0_end = 4 + u16::from_be_bytes([plain[4], plain[5]]) as usize;
    let record = [
        0x1C, 0x02, 0x05, 0x00, 0x04, b'H', b'e', b'r', b'o', 0x1C, 0x02, 0x78, 0x00, 0x01, b'x',
        0x00,
    ];
    let mut body = b"Photoshop 3.0\08BIM\x04\x04\x00\x00".to_vec();
    body.extend_from_slice(&(record.len() as u32).to_be_bytes());
    body.extend_from_slice(&record);

    let mut jpeg = plain[..app0_end].to_vec();
    jpeg.extend_from_slice(&[0xFF, 0xED]);
    jpeg.extend_from_slice(&(body.len() as u16 + 2).to_be_bytes());
    jpeg.extend_from_slice(&body);
    jpeg.extend_from_slice(&plain[app0_end..]);

    let out_dir = TempDir::new().unwrap();
    let image = write_data(out_dir.path(), "hero.jpg", &jpeg);
    let data = write_data(out_dir.path(), "costume.dat", b"costume");

    assert_eq!(inspect(&image)?.iptc_datasets, Some(2));
    assert_eq!(inspect(&image)?.segment_count, 12);

    pack(&image, &data)?;
    let info = inspect(&image)?;
    assert_eq!(info.iptc_datasets, Some(2));
    assert_eq!(info.payload_len, Some(7));

    Ok(())
}

#[test]
fn unpack_refuses_to_write_over_its_own_image() -> Result<()> {
    let (out_dir, image) = stage(CARRIER_IMAGE);
    let data = write_data(out_dir.path(), "costume.dat", b"costume");
    pack(&image, &data)?;
    let packed = fs::read(&image).unwrap();

    let result = unpack(&image, &image);

    assert!(matches!(result, Err(CostumeError::SamePath { .. })));
    assert_eq!(fs::read(&image).unwrap(), packed);

    Ok(())
}

#[test]
#[cfg(unix)]
fn pack_through_a_symlink_keeps_the_link() -> Result<()> {
    let (out_dir, real) = stage(CARRIER_IMAGE);
    let link = out_dir.path().join("link.jpg");
    std::os::unix::fs::symlink(&real, &link).unwrap();
    let data = write_data(out_dir.path(), "costume.dat", b"costume");
    let original = fs::read(&real).unwrap();

    pack(&link, &data)?;

    let link_meta = fs::symlink_metadata(&link).unwrap();
    assert!(link_meta.file_type().is_symlink());
    assert_eq!(extract(&fs::read(&real).unwrap())?, b"costume");
    assert_eq!(
        fs::read(out_dir.path().join("link.jpg.bak")).unwrap(),
        original
    );

    Ok(())
}

#[test]
#[cfg(unix)]
fn pack_and_unpack_keep_usual_file_modes() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = |path: &Path| fs::metadata(path).unwrap().permissions().mode() & 0o777;
    let (out_dir, image) = stage(CARRIER_IMAGE);
    fs::set_permissions(&image, fs::Permissions::from_mode(0o640)).unwrap();
    let data = write_data(out_dir.path(), "costume.dat", b"costume");
    let restored = out_dir.path().join("restored.dat");

    let backup = pack_with_options(&image, &data, &PackOptions::default())?;
    unpack(&image, &restored)?;

    assert_eq!(mode(&image), 0o640);
    assert_eq!(mode(&backup), 0o640);
    // same as any file the user creates there
    assert_eq!(mode(&restored), mode(&data));

    Ok(())
}
