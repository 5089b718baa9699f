// Certificate Issuance
// Thin wrapper over the openssl tool chain: key -> CSR -> self-signed x509.
// Not a cryptographic implementation; failures surface as ExternalTool errors.

use std::fs;
use std::process::Command;

use log::info;
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

use crate::error::{CryptoError, CryptoResult};

/// Subject identity for a self-signed certificate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateRequest {
    pub common_name: String,
    pub country: String,
    pub state: String,
    pub locality: String,
    pub organization: String,
    pub organizational_unit: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct CertificateResponse {
    pub certificate: String,
}

impl CertificateRequest {
    /// openssl -subj layout: /C=../ST=../L=../O=../OU=../CN=../emailAddress=..
    fn subject(&self) -> String {
        format!(
            "/C={}/ST={}/L={}/O={}/OU={}/CN={}/emailAddress={}",
            self.country,
            self.state,
            self.locality,
            self.organization,
            self.organizational_unit,
            self.common_name,
            self.email
        )
    }
}

fn run_tool(command: &mut Command) -> CryptoResult<()> {
    let output = command
        .output()
        .map_err(|e| CryptoError::ExternalTool(format!("failed to launch openssl: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CryptoError::ExternalTool(format!(
            "openssl exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(())
}

/// Issue a self-signed certificate for the requested subject and return the
/// PEM text. Key material for the certificate is openssl's own; it is not
/// related to the service's RSA/ElGamal keys.
pub fn generate_certificate(request: &CertificateRequest) -> CryptoResult<CertificateResponse> {
    let dir = TempDir::new()
        .map_err(|e| CryptoError::ExternalTool(format!("failed to create temp dir: {}", e)))?;

    let key_path = dir.path().join("private.key");
    let csr_path = dir.path().join("request.csr");
    let cert_path = dir.path().join("certificate.crt");

    run_tool(
        Command::new("openssl")
            .args(["genrsa", "-out"])
            .arg(&key_path)
            .arg("2048"),
    )?;

    run_tool(
        Command::new("openssl")
            .args(["req", "-new", "-key"])
            .arg(&key_path)
            .arg("-out")
            .arg(&csr_path)
            .arg("-subj")
            .arg(request.subject()),
    )?;

    run_tool(
        Command::new("openssl")
            .args(["x509", "-req", "-days", "365", "-in"])
            .arg(&csr_path)
            .arg("-signkey")
            .arg(&key_path)
            .arg("-out")
            .arg(&cert_path),
    )?;

    let certificate = fs::read_to_string(&cert_path)
        .map_err(|e| CryptoError::ExternalTool(format!("failed to read certificate: {}", e)))?;

    info!("issued self-signed certificate for {}", request.common_name);
    Ok(CertificateResponse { certificate })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> CertificateRequest {
        CertificateRequest {
            common_name: "example.org".to_string(),
            country: "DE".to_string(),
            state: "Bavaria".to_string(),
            locality: "Munich".to_string(),
            organization: "Example Org".to_string(),
            organizational_unit: "Engineering".to_string(),
            email: "admin@example.org".to_string(),
        }
    }

    #[test]
    fn test_subject_layout() {
        let subject = sample_request().subject();
        assert_eq!(
            subject,
            "/C=DE/ST=Bavaria/L=Munich/O=Example Org/OU=Engineering\
             /CN=example.org/emailAddress=admin@example.org"
        );
    }

    #[test]
    fn test_request_deserializes_from_json() {
        let json = r#"{
            "common_name": "example.org",
            "country": "DE",
            "state": "Bavaria",
            "locality": "Munich",
            "organization": "Example Org",
            "organizational_unit": "Engineering",
            "email": "admin@example.org"
        }"#;

        let request: CertificateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.subject(), sample_request().subject());
    }
}
