// src/storage/file.rs

use std::fs;
use std::io;
use std::path::PathBuf;

use super::keys::StorageKey;

// Backend local: um arquivo `<chave>.json` por coleção dentro do diretório
// de dados. É o equivalente do localStorage da variante web — sobrevive a
// reinícios do processo, mas não é compartilhado entre máquinas.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn slot_path(&self, key: StorageKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }

    // Ausência e conteúdo ilegível são tratados igual: None, nunca erro.
    // O chamador cai nos dados de demonstração (seed).
    pub fn read(&self, key: StorageKey) -> Option<serde_json::Value> {
        let path = self.slot_path(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Falha ao ler o slot '{}': {}", key, e);
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Slot '{}' com JSON inválido, usando padrão: {}", key, e);
                None
            }
        }
    }

    pub fn write(&self, key: StorageKey, value: &serde_json::Value) -> io::Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        fs::write(self.slot_path(key), bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn escreve_e_rele_um_slot() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path()).unwrap();

        let value = json!([{ "id": "abc", "name": "Rua A", "order": 0 }]);
        backend.write(StorageKey::Streets, &value).unwrap();

        assert_eq!(backend.read(StorageKey::Streets), Some(value));
    }

    #[test]
    fn slot_ausente_retorna_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path()).unwrap();

        assert_eq!(backend.read(StorageKey::Pallets), None);
    }

    #[test]
    fn slot_corrompido_retorna_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path()).unwrap();

        fs::write(dir.path().join("materials.json"), b"{ nao e json").unwrap();
        assert_eq!(backend.read(StorageKey::Materials), None);
    }
}
