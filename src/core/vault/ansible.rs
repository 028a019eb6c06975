//! Ansible Vault 1.1 (AES256) codec.
//!
//! File layout:
//!
//! ```text
//! $ANSIBLE_VAULT;1.1;AES256
//! <hex of: hex(salt) \n hex(hmac) \n hex(ciphertext)>   (80 columns per line)
//! ```
//!
//! Keys come from PBKDF2-HMAC-SHA256 over the password and a random 32-byte
//! salt (10000 rounds, 80 bytes: AES key, HMAC key, CTR IV). The plaintext is
//! PKCS#7 padded and encrypted with AES-256-CTR; the HMAC-SHA256 of the
//! ciphertext authenticates the file. `ansible-vault view` reads the output.

use aes::Aes256;
use ctr::cipher::{KeyIvInit, StreamCipher};
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use tracing::trace;
use zeroize::Zeroizing;

use super::Codec;
use crate::core::domain::Password;
use crate::error::{Result, VaultError};

type Aes256Ctr = ctr::Ctr128BE<Aes256>;
type HmacSha256 = Hmac<Sha256>;

pub(super) const MAGIC: &str = "$ANSIBLE_VAULT";
const VERSION: &str = "1.1";
const LABELLED_VERSION: &str = "1.2";
const CIPHER_NAME: &str = "AES256";

const PBKDF2_ROUNDS: u32 = 10_000;
const SALT_LEN: usize = 32;
const KEY_LEN: usize = 32;
const IV_LEN: usize = 16;
const DERIVED_LEN: usize = 2 * KEY_LEN + IV_LEN;
const BLOCK_LEN: usize = 16;
const LINE_WIDTH: usize = 80;

/// Ansible Vault 1.1 codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsibleVault;

impl Codec for AnsibleVault {
    fn name(&self) -> &'static str {
        "ansible-vault-1.1"
    }

    fn encrypt(&self, plaintext: &[u8], password: &Password) -> Result<String> {
        trace!(plaintext_len = plaintext.len(), "encrypting");

        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        let keys = derive_keys(password, &salt);

        let mut data = pad(plaintext);
        apply_keystream(&keys, &mut data)?;
        let tag = mac(&keys)?.chain_update(&data[..]).finalize().into_bytes();

        let inner = format!(
            "{}\n{}\n{}",
            hex::encode(salt),
            hex::encode(tag),
            hex::encode(&data[..])
        );
        let body = hex::encode(inner.as_bytes());

        let mut out = String::with_capacity(body.len() + body.len() / LINE_WIDTH + 32);
        out.push_str(MAGIC);
        out.push(';');
        out.push_str(VERSION);
        out.push(';');
        out.push_str(CIPHER_NAME);
        out.push('\n');
        for line in body.as_bytes().chunks(LINE_WIDTH) {
            // hex output is ASCII
            out.push_str(std::str::from_utf8(line).unwrap_or_default());
            out.push('\n');
        }

        trace!(ciphertext_len = out.len(), "encrypted");
        Ok(out)
    }

    fn decrypt(&self, encrypted: &str, password: &Password) -> Result<Vec<u8>> {
        trace!(ciphertext_len = encrypted.len(), "decrypting");

        let mut lines = encrypted.lines().map(str::trim).filter(|l| !l.is_empty());
        let header = lines
            .next()
            .ok_or_else(|| VaultError::Format("file is empty".to_string()))?;
        check_header(header)?;

        let body: String = lines.collect();
        if body.is_empty() {
            return Err(VaultError::Format("no encrypted payload after header".to_string()).into());
        }
        let inner = hex::decode(&body)
            .map_err(|e| VaultError::Format(format!("payload is not hex: {}", e)))?;

        let sections: Vec<&[u8]> = inner.split(|b| *b == b'\n').collect();
        let [salt, tag, data] = sections.as_slice() else {
            return Err(VaultError::Format(format!(
                "expected 3 payload sections, found {}",
                sections.len()
            ))
            .into());
        };

        let salt = decode_section("salt", salt)?;
        let tag = decode_section("hmac", tag)?;
        let data = decode_section("ciphertext", data)?;
        if salt.is_empty() {
            return Err(VaultError::Format("empty salt".to_string()).into());
        }
        if data.is_empty() || data.len() % BLOCK_LEN != 0 {
            return Err(VaultError::Format(format!(
                "ciphertext length {} is not a positive multiple of {}",
                data.len(),
                BLOCK_LEN
            ))
            .into());
        }

        let keys = derive_keys(password, &salt);
        mac(&keys)?
            .chain_update(&data)
            .verify_slice(&tag)
            .map_err(|_| VaultError::Authentication)?;

        let mut plain = Zeroizing::new(data);
        apply_keystream(&keys, &mut plain)?;
        let len = unpad(&plain)?;

        trace!(plaintext_len = len, "decrypted");
        Ok(plain[..len].to_vec())
    }
}

fn check_header(header: &str) -> Result<()> {
    let fields: Vec<&str> = header.split(';').map(str::trim).collect();
    match fields.as_slice() {
        [MAGIC, VERSION, cipher] | [MAGIC, LABELLED_VERSION, cipher, _] => {
            if *cipher != CIPHER_NAME {
                return Err(VaultError::Format(format!("unsupported cipher '{}'", cipher)).into());
            }
            Ok(())
        }
        [MAGIC, version, ..] => {
            Err(VaultError::Format(format!("unsupported vault version '{}'", version)).into())
        }
        _ => Err(VaultError::Format("missing $ANSIBLE_VAULT header".to_string()).into()),
    }
}

fn decode_section(name: &str, section: &[u8]) -> Result<Vec<u8>> {
    hex::decode(section)
        .map_err(|e| VaultError::Format(format!("{} is not hex: {}", name, e)).into())
}

fn derive_keys(password: &Password, salt: &[u8]) -> Zeroizing<[u8; DERIVED_LEN]> {
    let mut keys = Zeroizing::new([0u8; DERIVED_LEN]);
    pbkdf2::pbkdf2_hmac::<Sha256>(password.expose(), salt, PBKDF2_ROUNDS, &mut keys[..]);
    keys
}

fn apply_keystream(keys: &[u8; DERIVED_LEN], data: &mut [u8]) -> Result<()> {
    let mut cipher = Aes256Ctr::new_from_slices(&keys[..KEY_LEN], &keys[2 * KEY_LEN..])
        .map_err(|e| VaultError::Format(format!("invalid key material: {}", e)))?;
    cipher.apply_keystream(data);
    Ok(())
}

fn mac(keys: &[u8; DERIVED_LEN]) -> Result<HmacSha256> {
    <HmacSha256 as Mac>::new_from_slice(&keys[KEY_LEN..2 * KEY_LEN])
        .map_err(|e| VaultError::Format(format!("invalid hmac key: {}", e)).into())
}

/// PKCS#7 padding to the AES block size (always adds 1..=16 bytes).
fn pad(plaintext: &[u8]) -> Zeroizing<Vec<u8>> {
    let fill = BLOCK_LEN - plaintext.len() % BLOCK_LEN;
    let mut out = Zeroizing::new(Vec::with_capacity(plaintext.len() + fill));
    out.extend_from_slice(plaintext);
    out.resize(plaintext.len() + fill, fill as u8);
    out
}

/// Length of the plaintext inside PKCS#7 padded data.
fn unpad(data: &[u8]) -> Result<usize> {
    let invalid = || VaultError::Format("invalid padding".to_string());
    let fill = *data.last().ok_or_else(invalid)? as usize;
    if fill == 0 || fill > BLOCK_LEN || fill > data.len() {
        return Err(invalid().into());
    }
    if !data[data.len() - fill..].iter().all(|b| *b as usize == fill) {
        return Err(invalid().into());
    }
    Ok(data.len() - fill)
}
