use chainmix::cipher::{AsyncStreamCipher, Block, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use chainmix::{Decryptor, Encryptor, HexDump};
use hex_literal::hex;

const KEY: [u8; 1] = [0xCB];
// Chain seed 0xB1, counter seed 0x35.
const IV: [u8; 2] = [0xB1, 0x35];

#[test]
fn single_byte_vector() {
    let mut buf = [0x48];
    Encryptor::new(&KEY.into(), &IV.into()).encrypt(&mut buf);
    assert_eq!(buf, [0xF9]);

    Decryptor::new(&KEY.into(), &IV.into()).decrypt(&mut buf);
    assert_eq!(buf, [0x48]);
}

#[test]
fn multi_byte_vector() {
    let mut buf = *b"Hi!";
    Encryptor::new(&KEY.into(), &IV.into()).encrypt(&mut buf);
    assert_eq!(buf, hex!("F9F6CF"));

    Decryptor::new(&KEY.into(), &IV.into()).decrypt(&mut buf);
    assert_eq!(&buf, b"Hi!");
}

#[test]
fn round_trip_across_states() {
    let states: [(u8, u8, u8); 5] = [
        (0xCB, 0xB1, 0x35),
        (0x00, 0x00, 0x00),
        (0xFF, 0xFF, 0xFF),
        (0x5A, 0x13, 0x80),
        (0x01, 0xFE, 0x7F),
    ];
    let msgs: [&[u8]; 4] = [b"", b"\x00", b"The quick brown fox", &[0xFF; 64]];

    for &(key, chain_seed, ctr_seed) in &states {
        let key = [key];
        let iv = [chain_seed, ctr_seed];
        for msg in msgs {
            let mut buf = msg.to_vec();
            Encryptor::new(&key.into(), &iv.into()).encrypt(&mut buf);
            assert_eq!(buf.len(), msg.len());

            Decryptor::new(&key.into(), &iv.into()).decrypt(&mut buf);
            assert_eq!(buf, msg);
        }
    }
}

#[test]
fn empty_input_is_a_no_op() {
    let mut buf: [u8; 0] = [];
    Encryptor::new(&KEY.into(), &IV.into()).encrypt(&mut buf);
    Decryptor::new(&KEY.into(), &IV.into()).decrypt(&mut buf);
    assert_eq!(buf, []);
}

#[test]
fn encryption_is_deterministic() {
    let mut a = *b"determinism";
    let mut b = *b"determinism";
    Encryptor::new(&KEY.into(), &IV.into()).encrypt(&mut a);
    Encryptor::new(&KEY.into(), &IV.into()).encrypt(&mut b);
    assert_eq!(a, b);
}

#[test]
fn chunked_processing_matches_one_shot() {
    let pt = *b"The quick brown fox jumps over the lazy dog.";

    let mut expected = pt;
    Encryptor::new(&KEY.into(), &IV.into()).encrypt(&mut expected);

    for n in 1..=pt.len() {
        let mut buf = pt;
        let mut enc = Encryptor::new(&KEY.into(), &IV.into());
        for chunk in buf.chunks_mut(n) {
            for b in chunk.iter_mut() {
                enc.encrypt_block_mut(Block::<Encryptor>::from_mut_slice(core::slice::from_mut(b)));
            }
        }
        assert_eq!(buf, expected);

        let mut dec = Decryptor::new(&KEY.into(), &IV.into());
        for chunk in buf.chunks_mut(n) {
            for b in chunk.iter_mut() {
                dec.decrypt_block_mut(Block::<Decryptor>::from_mut_slice(core::slice::from_mut(b)));
            }
        }
        assert_eq!(buf, pt);
    }
}

#[test]
fn buffer_to_buffer() {
    let pt = *b"Hi!";
    let mut ct = [0u8; 3];
    Encryptor::new(&KEY.into(), &IV.into())
        .encrypt_b2b(&pt, &mut ct)
        .unwrap();
    assert_eq!(ct, hex!("F9F6CF"));

    let mut out = [0u8; 3];
    Decryptor::new(&KEY.into(), &IV.into())
        .decrypt_b2b(&ct, &mut out)
        .unwrap();
    assert_eq!(out, pt);
}

#[test]
fn buffer_to_buffer_rejects_length_mismatch() {
    let mut short = [0u8; 2];
    assert!(Encryptor::new(&KEY.into(), &IV.into())
        .encrypt_b2b(b"Hi!", &mut short)
        .is_err());
}

#[test]
fn slice_constructors_validate_lengths() {
    assert!(Encryptor::new_from_slices(&KEY, &IV).is_ok());
    assert!(Encryptor::new_from_slices(&[], &IV).is_err());
    assert!(Encryptor::new_from_slices(&[0xCB, 0xCB], &IV).is_err());
    assert!(Decryptor::new_from_slices(&KEY, &[0xB1]).is_err());
}

#[test]
fn hex_dump_formats_uppercase_pairs() {
    assert_eq!(HexDump(&hex!("F906CF")).to_string(), "F9 06 CF");
    assert_eq!(HexDump(&[]).to_string(), "");
}
