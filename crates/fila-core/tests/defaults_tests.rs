//! Process-wide default roots. Lives in its own test binary because the
//! defaults can be set only once per process.

use fila_core::{defaults, resolve, set_defaults, Defaults, FilaError, FilaPath, VolumeId};

#[test]
fn test_set_defaults_once() {
    let custom = Defaults {
        sep: '/',
        cwd: VolumeId::Documents,
        tmp: VolumeId::Library,
    };
    set_defaults(custom).unwrap();
    assert_eq!(defaults(), custom);
    assert_eq!(FilaPath::cwd().path(), "documents");
    assert_eq!(FilaPath::temporary().path(), "library");
    assert_eq!(resolve("documents/a").volume, VolumeId::Documents);

    let again = set_defaults(Defaults::default());
    assert!(matches!(again, Err(FilaError::DefaultsAlreadySet)));
    assert_eq!(defaults(), custom);
}
