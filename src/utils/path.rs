use std::path::PathBuf;

/// Caminho do banco de dados
pub fn get_database_path() -> PathBuf {
    directories::ProjectDirs::from("br", "univap", "Sapiens")
        .map(|dirs| dirs.data_dir().join("sapiens.db"))
        .unwrap_or_else(|| PathBuf::from("sapiens.db"))
}

/// Caminho do arquivo de configuração
pub fn get_config_path() -> PathBuf {
    directories::ProjectDirs::from("br", "univap", "Sapiens")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}
