// 私钥加载
//
// 请求里的私钥可能是 OpenSSH 格式，也可能是 PKCS#1 / SEC1 / PKCS#8 PEM，
// DSA 还可能是 OpenSSL 传统格式。
// 统一解析后按算法归类，再重新编码成 OpenSSH 文本并重新解析，
// 认证层只会拿到这一种规范格式的私钥。

use std::fmt;

use dsa::BigUint;
use pkcs8::der::asn1::UintRef;
use pkcs8::der::{pem, Decode};
use pkcs8::DecodePrivateKey;
use russh::keys::ssh_key::private::DsaKeypair;
use russh::keys::ssh_key::{Algorithm, LineEnding};
use russh::keys::PrivateKey;
use tracing::debug;

use super::error::SshError;
use super::log::TransferLog;

/// 支持的私钥算法族
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Rsa,
    Ed25519,
    Ecdsa,
    Dsa,
}

impl KeyAlgorithm {
    /// 按解析出的算法归类，不支持的类型带上检测到的名称
    pub fn classify(algorithm: &Algorithm) -> Result<Self, SshError> {
        match algorithm {
            Algorithm::Rsa { .. } => Ok(Self::Rsa),
            Algorithm::Ed25519 => Ok(Self::Ed25519),
            Algorithm::Ecdsa { .. } => Ok(Self::Ecdsa),
            Algorithm::Dsa => Ok(Self::Dsa),
            other => Err(SshError::Key(format!(
                "unsupported key type: {}",
                other.as_str()
            ))),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Rsa => "RSA",
            Self::Ed25519 => "Ed25519",
            Self::Ecdsa => "ECDSA",
            Self::Dsa => "DSA",
        }
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 已加载的私钥，只在单个请求内存活
pub struct LoadedKey {
    pub algorithm: KeyAlgorithm,
    pub key: PrivateKey,
}

impl fmt::Debug for LoadedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedKey")
            .field("algorithm", &self.algorithm)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// 边界层的格式预检：必须带 PEM 私钥标记
pub fn has_private_key_markers(blob: &str) -> bool {
    blob.contains("BEGIN") && blob.contains("PRIVATE KEY")
}

/// 解析、归类并规范化私钥
///
/// 不支持口令保护的私钥，遇到加密私钥直接返回 `SshError::Key`。
pub fn load_private_key(blob: &str, log: &mut TransferLog) -> Result<LoadedKey, SshError> {
    match decode_and_normalize(blob) {
        Ok(loaded) => {
            match loaded.key.algorithm() {
                Algorithm::Ecdsa { curve } => log.info(format!(
                    "{} private key loaded ({})",
                    loaded.algorithm,
                    curve.as_str()
                )),
                _ => log.info(format!("{} private key loaded", loaded.algorithm)),
            }
            Ok(loaded)
        }
        Err(e) => {
            log.error(format!("Failed to load private key: {}", e));
            Err(e)
        }
    }
}

fn decode_and_normalize(blob: &str) -> Result<LoadedKey, SshError> {
    let parsed = decode_key(blob)?;
    let algorithm = KeyAlgorithm::classify(&parsed.algorithm())?;
    let key = normalize(&parsed)?;
    Ok(LoadedKey { algorithm, key })
}

/// 先按 OpenSSH 原生格式解析，失败后回退到通用 PEM 容器
fn decode_key(blob: &str) -> Result<PrivateKey, SshError> {
    match PrivateKey::from_openssh(blob) {
        Ok(key) if key.is_encrypted() => Err(passphrase_protected()),
        Ok(key) => Ok(key),
        Err(openssh_err) => {
            debug!("[SSH] Not an OpenSSH private key ({}), trying PEM", openssh_err);
            decode_pem(blob)
        }
    }
}

fn passphrase_protected() -> SshError {
    SshError::Key(
        "private key is passphrase-protected; only unencrypted keys are supported".to_string(),
    )
}

/// PKCS#1 / SEC1 / PKCS#8 PEM，DSA 单独处理
fn decode_pem(blob: &str) -> Result<PrivateKey, SshError> {
    if blob.contains("BEGIN ENCRYPTED PRIVATE KEY") || blob.contains("Proc-Type: 4,ENCRYPTED") {
        return Err(passphrase_protected());
    }
    if blob.contains("BEGIN DSA PRIVATE KEY") {
        return decode_dsa_traditional(blob);
    }

    match russh::keys::decode_secret_key(blob, None) {
        Ok(key) => Ok(key),
        Err(russh::keys::Error::KeyIsEncrypted) => Err(passphrase_protected()),
        // russh 不识别 PKCS#8 里的 DSA OID
        Err(e) if blob.contains("BEGIN PRIVATE KEY") => {
            decode_dsa_pkcs8(blob).map_err(|dsa_err| {
                debug!("[SSH] Not a PKCS#8 DSA key either: {}", dsa_err);
                SshError::Key(e.to_string())
            })
        }
        Err(e) => Err(SshError::Key(e.to_string())),
    }
}

fn invalid_dsa(e: impl fmt::Display) -> SshError {
    SshError::Key(format!("invalid DSA private key: {}", e))
}

fn decode_dsa_pkcs8(blob: &str) -> Result<PrivateKey, SshError> {
    let signing_key = dsa::SigningKey::from_pkcs8_pem(blob.trim()).map_err(invalid_dsa)?;
    dsa_private_key(signing_key)
}

/// OpenSSL 传统格式: SEQUENCE { version, p, q, g, y, x }
fn decode_dsa_traditional(blob: &str) -> Result<PrivateKey, SshError> {
    let (label, der) = pem::decode_vec(blob.trim().as_bytes()).map_err(invalid_dsa)?;
    if label != "DSA PRIVATE KEY" {
        return Err(invalid_dsa(format!("unexpected PEM label {}", label)));
    }

    let fields = Vec::<UintRef<'_>>::from_der(&der).map_err(invalid_dsa)?;
    let [_version, p, q, g, y, x] = fields.as_slice() else {
        return Err(invalid_dsa(format!(
            "expected 6 integers, found {}",
            fields.len()
        )));
    };
    let int = |n: &UintRef<'_>| BigUint::from_bytes_be(n.as_bytes());

    let components =
        dsa::Components::from_components(int(p), int(q), int(g)).map_err(invalid_dsa)?;
    let verifying_key =
        dsa::VerifyingKey::from_components(components, int(y)).map_err(invalid_dsa)?;
    let signing_key =
        dsa::SigningKey::from_components(verifying_key, int(x)).map_err(invalid_dsa)?;
    dsa_private_key(signing_key)
}

fn dsa_private_key(signing_key: dsa::SigningKey) -> Result<PrivateKey, SshError> {
    let keypair = DsaKeypair::try_from(signing_key).map_err(invalid_dsa)?;
    Ok(PrivateKey::from(keypair))
}

/// 重新编码成 OpenSSH 文本后再解析，得到规范格式的私钥
fn normalize(key: &PrivateKey) -> Result<PrivateKey, SshError> {
    let encoded = key
        .to_openssh(LineEnding::LF)
        .map_err(|e| SshError::Key(format!("failed to re-encode key: {}", e)))?;
    PrivateKey::from_openssh(encoded.as_bytes())
        .map_err(|e| SshError::Key(format!("failed to re-parse canonical key: {}", e)))
}
