use crate::controller::course::TeeChoice;
use crate::model::GeoPoint;
use std::{fs, path::PathBuf};

/// # Errors
///
/// Will return `Err` if the value is not a positive number of yards
pub fn check_positive_yards(value: &str) -> Result<f64, String> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(format!("'{value}' is not a positive yardage.")),
    }
}

/// # Errors
///
/// Will return `Err` if the factor is negative or not a number
pub fn check_elevation_factor(value: &str) -> Result<f64, String> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(format!("'{value}' is not a usable elevation factor.")),
    }
}

/// # Errors
///
/// Will return `Err` if the value is not a `lat,lon` pair
pub fn check_geo_point(value: &str) -> Result<GeoPoint, String> {
    GeoPoint::parse(value).map_err(|e| e.to_string())
}

/// Tee as `category/name`, e.g. `male/Blue`.
///
/// # Errors
///
/// Will return `Err` if either half is missing
pub fn check_tee(value: &str) -> Result<TeeChoice, String> {
    match value.split_once('/') {
        Some((category, tee_name)) if !category.trim().is_empty() && !tee_name.trim().is_empty() => {
            Ok(TeeChoice {
                category: category.trim().to_string(),
                tee_name: tee_name.trim().to_string(),
            })
        }
        _ => Err(format!("tee '{value}' should look like category/name, e.g. male/Blue")),
    }
}

/// A scorecard row as `Name:4,5,,3`. Cells are kept as typed; the ledger
/// decides what counts as a score.
///
/// # Errors
///
/// Will return `Err` if the name is missing
pub fn check_player_scores(value: &str) -> Result<(String, Vec<String>), String> {
    let (name, cells) = value.split_once(':').unwrap_or((value, ""));
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("player row '{value}' has no name"));
    }
    let cells = if cells.is_empty() {
        Vec::new()
    } else {
        cells.split(',').map(|c| c.trim().to_string()).collect()
    };
    Ok((name.to_string(), cells))
}

/// # Errors
///
/// Will return `Err` if the file is not readable
pub fn check_readable_file(file: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(file);
    if !path.is_file() || fs::metadata(&path).is_err() {
        return Err(format!("The file '{file}' is not readable."));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yardage_and_factor() {
        assert_eq!(check_positive_yards("150"), Ok(150.0));
        assert!(check_positive_yards("0").is_err());
        assert!(check_positive_yards("far").is_err());
        assert_eq!(check_elevation_factor("0.3"), Ok(0.3));
        assert!(check_elevation_factor("-1").is_err());
    }

    #[test]
    fn test_player_scores() {
        assert_eq!(
            check_player_scores("Sam:4,5,,3"),
            Ok((
                "Sam".to_string(),
                vec!["4".into(), "5".into(), String::new(), "3".into()]
            ))
        );
        assert_eq!(check_player_scores("Sam"), Ok(("Sam".to_string(), vec![])));
        assert!(check_player_scores(":4,5").is_err());
    }

    #[test]
    fn test_tee_and_point() {
        assert_eq!(
            check_tee("male/Blue"),
            Ok(TeeChoice {
                category: "male".into(),
                tee_name: "Blue".into()
            })
        );
        assert!(check_tee("Blue").is_err());
        assert!(check_geo_point("36.5,-121.9").is_ok());
        assert!(check_geo_point("91,0").is_err());
    }
}
