//! Published check values, driven through the public API only
use std::io::Write;

use tempfile::NamedTempFile;

use checksum_tapestry::{
    adler32::Adler32,
    crc::{CRCConfiguration, CRC},
    fletcher16::Fletcher16,
    fletcher32::Fletcher32,
    io::{hash_data, hash_file_hex},
    multi::{Algorithm, MultiChecksum},
    spamsum::SpamSum,
    Checksum,
};

const CHECK: &[u8] = b"123456789";

#[test]
fn crc_catalogue() {
    assert_eq!(CRC::data(CRCConfiguration::<u16>::IBM, CHECK), 0xBB3D);
    assert_eq!(CRC::data(CRCConfiguration::<u16>::CCITT, CHECK), 0x2189);
    assert_eq!(CRC::data(CRCConfiguration::<u16>::XMODEM, CHECK), 0x31C3);
    assert_eq!(CRC::data(CRCConfiguration::<u16>::CCITT_FALSE, CHECK), 0x29B1);
    assert_eq!(CRC::data(CRCConfiguration::<u32>::ISO, CHECK), 0xCBF43926);
    assert_eq!(CRC::data(CRCConfiguration::<u32>::CASTAGNOLI, CHECK), 0xE3069283);
    assert_eq!(
        CRC::data(CRCConfiguration::<u64>::ECMA, CHECK),
        0x995DC9BBDF1939FA
    );
}

#[test]
fn modular_check_values() {
    assert_eq!(Adler32::default().compute(CHECK), 0x091E01DE);
    assert_eq!(Fletcher16::default().compute(CHECK), 0x1EDE);
    assert_eq!(Fletcher32::default().compute(CHECK), 0x091501DD);
}

#[test]
fn hex_and_bytes_agree() {
    let (hex, bytes) = hash_data::<Fletcher32>(b"abcde").unwrap();
    assert_eq!(hex, "05c301ef");
    assert_eq!(bytes, vec![0x05, 0xC3, 0x01, 0xEF]);
}

#[test]
fn image_file_with_every_algorithm() {
    let _ = env_logger::try_init();

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(CHECK).unwrap();
    temp_file.flush().unwrap();

    let results = MultiChecksum::file(&Algorithm::ALL, temp_file.path()).unwrap();
    let lookup = |wanted: Algorithm| {
        results
            .iter()
            .find(|(algorithm, _)| *algorithm == wanted)
            .map(|(_, result)| result.clone())
            .unwrap()
    };

    assert_eq!(lookup(Algorithm::Adler32), "091e01de");
    assert_eq!(lookup(Algorithm::Crc16), "bb3d");
    assert_eq!(lookup(Algorithm::Crc32), "cbf43926");
    assert_eq!(lookup(Algorithm::Md5), "25f9e794323b453885f5181f1b624d0b");
    assert_eq!(
        lookup(Algorithm::Sha1),
        "f7c3bc1d808e04732adf679965ccc34ca7ae3441"
    );
    assert_eq!(
        lookup(Algorithm::Sha256),
        "15e2b0d3c33891ebb0f1ef609ec419420c20e320ce94c65fbc8c3312448eb225"
    );

    let (hex, _) = hash_file_hex::<Adler32, _>(temp_file.path()).unwrap();
    assert_eq!(hex, lookup(Algorithm::Adler32));
}

/// Deterministic pseudo-random bytes (a 64-bit LCG)
fn noise(len: usize) -> Vec<u8> {
    let mut x: u64 = 0x2545F4914F6CDD1D;
    (0..len)
        .map(|_| {
            x = x
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (x >> 33) as u8
        })
        .collect()
}

/// Length of the longest run of characters both strings share
fn longest_common_substring(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut best = 0;
    let mut previous = vec![0usize; b.len() + 1];

    for &x in a {
        let mut current = vec![0usize; b.len() + 1];
        for (j, &y) in b.iter().enumerate() {
            if x == y {
                current[j + 1] = previous[j] + 1;
                best = best.max(current[j + 1]);
            }
        }
        previous = current;
    }

    best
}

#[test]
fn small_edit_keeps_digests_similar() {
    let original = noise(4096);
    let mut edited = original.clone();
    edited.insert(2048, b'X');

    let before = SpamSum::data(&original).unwrap();
    let after = SpamSum::data(&edited).unwrap();
    assert_eq!(
        before,
        "96:VmjJ4DpO/GfLciNQETVDzp/nWIgiVaqFiNtcsVKXptWF:EJ43L+4DN/WMlmcCKWF"
    );
    assert_eq!(
        after,
        "96:VmjJ4DpO/GfLciNQETVDzT/nWIgiVaqFiNtcsVKXptWF:EJ43L+4Dv/WMlmcCKWF"
    );

    let first = |digest: &str| digest.split(':').nth(1).unwrap_or("").to_string();
    assert!(longest_common_substring(&first(&before), &first(&after)) >= 7);

    let unrelated = SpamSum::data(&vec![0x5Au8; 4096]).unwrap();
    assert_eq!(
        unrelated,
        "3:v//////////////////////////////////////////////////////////////P:n"
    );
    assert!(longest_common_substring(&first(&before), &first(&unrelated)) < 7);
}

#[test]
fn larger_inputs() {
    assert_eq!(
        SpamSum::data(&noise(1000)).unwrap(),
        "24:8cXT/xwMkWXr44rG/+DBrrYIprCIroaaB/d77FrqT+YfBe:hXbxwjWXE4rHV9prCI8aOF2TZfU"
    );
    assert_eq!(
        SpamSum::data(&noise(1 << 20)).unwrap(),
        "24576:Pr/b9y/CTge4RJekeQAmR9KLW1LVH3oloJ4Y6:PrJy/egDPrKLW1LVYlZT"
    );
}

#[test]
fn reset_preserves_configuration() {
    let mut crc = CRC::new(CRCConfiguration::<u16>::XMODEM);
    crc.update(b"garbage");
    crc.reset();
    crc.update(CHECK);
    assert_eq!(crc.end().unwrap(), "31c3");

    let mut adler = Adler32::new(0x12345678);
    adler.update(b"garbage");
    adler.reset();
    adler.update(CHECK);
    assert_eq!(adler.value(), 0x25AE5855);
}
