//! Пример: чтение `.sqd` файла через SqdDocument
//!
//! Демонстрирует:
//! - открытие файла и полное декодирование заголовка
//! - вывод сводки (версия, усилитель, параметры сбора)
//! - извлечение одного канала в сырых и физических единицах
//!
//! Запуск: `RUST_LOG=debug cargo run --example read_sqd_file -- R0874.sqd 0`

use std::env;

use sqd_core::SqdDocument;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let input_path = args.next().unwrap_or_else(|| "R0874.sqd".to_string());
    let channel: usize = args.next().map(|s| s.parse::<usize>()).transpose()?.unwrap_or(0);

    // --- Заголовок декодируется целиком при открытии ---
    let doc = match SqdDocument::open(&input_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("✗ Failed to open {input_path}: {e}");
            return Err(Box::new(e));
        }
    };

    println!("{doc}");

    let patient = doc.patient();
    if !patient.is_empty() {
        println!("Patient information");
        println!("\tID:         {}", patient.id.as_deref().unwrap_or("-"));
        println!("\tName:       {}", patient.name.as_deref().unwrap_or("-"));
        println!("\tBirthdate:  {}", patient.birthdate.as_deref().unwrap_or("-"));
        println!("\tGender:     {}", patient.gender.as_deref().unwrap_or("-"));
        println!("\tHandedness: {}", patient.handedness.as_deref().unwrap_or("-"));
    }

    // --- Извлечение канала ---
    let raw = doc.extract_channel_raw(channel)?;
    let scaled = doc.extract_channel_scaled(channel)?;

    println!("\n✓ Channel {channel}: {} samples", raw.len());
    println!("  Conversion factor : {}", doc.conversion_factors()[channel]);
    println!("  First raw samples : {:?}", &raw[..raw.len().min(10)]);
    println!("  First scaled      : {:?}", &scaled[..scaled.len().min(10)]);

    Ok(())
}
