use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Chaves das coleções persistidas
pub mod keys {
    pub const ESCOLA: &str = "sapiens_school_info";
    pub const OLIMPIADAS: &str = "sapiens_olimpiadas";
    pub const PARTICIPANTES: &str = "sapiens_participantes";
    pub const TURMAS: &str = "sapiens_turmas";
    pub const LEMBRETES: &str = "sapiens_lembretes";
    pub const USUARIOS: &str = "sapiens_users";
}

/// Wrapper do banco com acesso thread-safe.
///
/// Cada coleção é gravada como um documento JSON inteiro sob sua chave;
/// a última gravação vence.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Abre ou cria o banco de dados
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA busy_timeout = 5000;
            ",
        )?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.migrate()?;
        Ok(db)
    }

    /// Abre banco em memória (para testes)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        let conn = self.lock();
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv (
                chave TEXT PRIMARY KEY,
                valor TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        // Um mutex envenenado aqui significa pânico em outra thread;
        // seguimos com o guard mesmo assim.
        match self.conn.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Lê o documento de uma chave; None se nunca foi gravado
    pub fn get(&self, chave: &str) -> Result<Option<String>> {
        let conn = self.lock();
        let valor = conn
            .query_row("SELECT valor FROM kv WHERE chave = ?1", [chave], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(valor)
    }

    /// Grava (ou substitui) o documento de uma chave
    pub fn set(&self, chave: &str, valor: &str) -> Result<()> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO kv (chave, valor) VALUES (?1, ?2)
             ON CONFLICT(chave) DO UPDATE SET valor = excluded.valor",
            [chave, valor],
        )?;
        Ok(())
    }

    pub fn remove(&self, chave: &str) -> Result<()> {
        let conn = self.lock();
        conn.execute("DELETE FROM kv WHERE chave = ?1", [chave])?;
        Ok(())
    }

    /// Apaga todas as coleções (limpeza do sistema)
    pub fn clear(&self) -> Result<()> {
        let conn = self.lock();
        conn.execute("DELETE FROM kv", [])?;
        Ok(())
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_chave_inexistente() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get(keys::OLIMPIADAS).unwrap(), None);
    }

    #[test]
    fn test_set_sobrescreve() {
        let db = Database::open_in_memory().unwrap();
        db.set("k", "[1]").unwrap();
        db.set("k", "[1,2]").unwrap();
        assert_eq!(db.get("k").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_remove_e_clear() {
        let db = Database::open_in_memory().unwrap();
        db.set("a", "1").unwrap();
        db.set("b", "2").unwrap();

        db.remove("a").unwrap();
        assert_eq!(db.get("a").unwrap(), None);
        assert_eq!(db.get("b").unwrap().as_deref(), Some("2"));

        db.clear().unwrap();
        assert_eq!(db.get("b").unwrap(), None);
    }

    #[test]
    fn test_persiste_em_arquivo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sapiens.db");

        {
            let db = Database::open(&path).unwrap();
            db.set(keys::ESCOLA, "{\"nome\":\"Univap\"}").unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(
            db.get(keys::ESCOLA).unwrap().as_deref(),
            Some("{\"nome\":\"Univap\"}")
        );
    }
}
