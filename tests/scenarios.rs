//! End-to-end scenarios against a freshly formatted image: mount, create,
//! write, read, iterate, and remount.

use assoofs::block::{FileBlockDevice, MemBlockDevice};
use assoofs::constants::ROOT_INO;
use assoofs::{format, Mount};

#[test]
fn scenario_mount_resolves_root() {
    let dev = MemBlockDevice::new(16);
    format::format(&dev).unwrap();
    let mount = Mount::open(dev).unwrap();
    let root = mount.stat(ROOT_INO).unwrap();
    assert_eq!(root.inode_no, ROOT_INO);
    assert!(root.is_dir());
}

#[test]
fn scenario_mkdir_then_lookup() {
    let dev = MemBlockDevice::new(16);
    format::format(&dev).unwrap();
    let mount = Mount::open(dev).unwrap();

    let a = mount.mkdir(ROOT_INO, "a").unwrap();
    assert_eq!(a.inode_no, 11);
    assert_eq!(a.size, 0);
    assert_eq!(a.data_block_number, 3);

    let root = mount.stat(ROOT_INO).unwrap();
    assert_eq!(root.size, 1);

    let looked_up = mount.lookup(ROOT_INO, "a").unwrap();
    assert_eq!(looked_up, a);
}

#[test]
fn scenario_create_write_read() {
    let dev = MemBlockDevice::new(16);
    format::format(&dev).unwrap();
    let mount = Mount::open(dev).unwrap();

    mount.mkdir(ROOT_INO, "a").unwrap();
    let a = mount.lookup(ROOT_INO, "a").unwrap();

    let f = mount.create(a.inode_no, "f").unwrap();
    assert_eq!(f.inode_no, 12);
    assert_eq!(f.data_block_number, 4);

    mount.write(f.inode_no, 0, b"hello").unwrap();
    let stat = mount.stat(f.inode_no).unwrap();
    assert_eq!(stat.size, 5);

    let mut buf = [0u8; 5];
    let n = mount.read(f.inode_no, 0, &mut buf).unwrap();
    assert_eq!(n, 5);
    assert_eq!(&buf, b"hello");
}

#[test]
fn scenario_store_exhaustion() {
    let dev = MemBlockDevice::new(16);
    format::format(&dev).unwrap();
    let mount = Mount::open(dev).unwrap();

    let available_blocks = assoofs::constants::MAX_OBJECTS - 3;
    for i in 0..available_blocks {
        mount.create(ROOT_INO, &format!("f{i}")).unwrap();
    }
    let err = mount.create(ROOT_INO, "overflow").unwrap_err();
    assert!(matches!(err, assoofs::Error::NoSpace));
}

#[test]
fn scenario_iterate_after_create() {
    let dev = MemBlockDevice::new(16);
    format::format(&dev).unwrap();
    let mount = Mount::open(dev).unwrap();

    let a = mount.mkdir(ROOT_INO, "a").unwrap();
    mount.create(a.inode_no, "f").unwrap();

    let entries = mount.iterate(a.inode_no, 0).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "f");
    assert_eq!(entries[0].inode_no, 12);
}

#[test]
fn scenario_unmount_remount_preserves_state() {
    let tmp = tempfile::NamedTempFile::new().unwrap();

    {
        let dev = FileBlockDevice::open(tmp.path()).unwrap();
        format::format(&dev).unwrap();
        let mount = Mount::open(dev).unwrap();
        mount.mkdir(ROOT_INO, "a").unwrap();
        let a = mount.lookup(ROOT_INO, "a").unwrap();
        let f = mount.create(a.inode_no, "f").unwrap();
        mount.write(f.inode_no, 0, b"hello").unwrap();
    }

    let dev = FileBlockDevice::open(tmp.path()).unwrap();
    let mount = Mount::open(dev).unwrap();

    let a = mount.lookup(ROOT_INO, "a").unwrap();
    assert_eq!(a.inode_no, 11);
    assert_eq!(a.data_block_number, 3);

    let f = mount.lookup(a.inode_no, "f").unwrap();
    assert_eq!(f.inode_no, 12);

    let mut buf = [0u8; 5];
    mount.read(f.inode_no, 0, &mut buf).unwrap();
    assert_eq!(&buf, b"hello");
}
