use anyhow::{Context, Result};
use std::{fs, path::Path};

const MEXICAN_CITIES: &[&str] = &[
    "Ciudad de México",
    "Guadalajara",
    "Monterrey",
    "Puebla",
    "Tijuana",
    "León",
    "Ciudad Juárez",
    "Zapopan",
    "Mérida",
    "San Luis Potosí",
    "Aguascalientes",
    "Hermosillo",
    "Saltillo",
    "Mexicali",
    "Culiacán",
    "Querétaro",
    "Chihuahua",
    "Morelia",
    "Toluca",
    "Cancún",
    "Torreón",
    "Acapulco",
    "Reynosa",
    "Tlaquepaque",
    "Durango",
    "Tuxtla Gutiérrez",
    "Veracruz",
    "Xalapa",
    "Oaxaca de Juárez",
    "Villahermosa",
    "Irapuato",
    "Celaya",
    "Mazatlán",
    "Tampico",
    "Ensenada",
    "Cuernavaca",
    "Pachuca",
    "Tepic",
    "Campeche",
    "Chetumal",
    "La Paz",
    "Los Cabos",
    "Colima",
    "Manzanillo",
    "Zacatecas",
    "Tlaxcala",
    "Chilpancingo",
    "Ciudad Victoria",
    "Nuevo Laredo",
    "Matamoros",
    "Ciudad Obregón",
    "Puerto Vallarta",
    "San Nicolás de los Garza",
    "Apodaca",
    "Guadalupe",
    "Tlalnepantla",
    "Naucalpan",
    "Ecatepec",
    "Nezahualcóyotl",
    "Coatzacoalcos",
    "Córdoba",
    "Orizaba",
    "Poza Rica",
    "Salamanca",
    "Uruapan",
    "Zamora",
    "Los Mochis",
    "Nogales",
    "San Cristóbal de las Casas",
    "Tapachula",
    "Playa del Carmen",
    "Guanajuato",
    "San Miguel de Allende",
    "Taxco",
    "Tehuacán",
];

const MEXICAN_STATES: &[&str] = &[
    "Aguascalientes",
    "Baja California",
    "Baja California Sur",
    "Campeche",
    "Chiapas",
    "Chihuahua",
    "Coahuila",
    "Colima",
    "Durango",
    "Estado de México",
    "Guanajuato",
    "Guerrero",
    "Hidalgo",
    "Jalisco",
    "Michoacán",
    "Morelos",
    "Nayarit",
    "Nuevo León",
    "Oaxaca",
    "Puebla",
    "Querétaro",
    "Quintana Roo",
    "San Luis Potosí",
    "Sinaloa",
    "Sonora",
    "Tabasco",
    "Tamaulipas",
    "Tlaxcala",
    "Veracruz",
    "Yucatán",
    "Zacatecas",
];

const COUNTRIES: &[&str] = &[
    "México",
    "Estados Unidos",
    "Canadá",
    "Guatemala",
    "Belice",
    "Honduras",
    "El Salvador",
    "Nicaragua",
    "Costa Rica",
    "Panamá",
    "Cuba",
    "República Dominicana",
    "Puerto Rico",
    "Colombia",
    "Venezuela",
    "Ecuador",
    "Perú",
    "Bolivia",
    "Chile",
    "Argentina",
    "Uruguay",
    "Paraguay",
    "Brasil",
    "España",
    "Portugal",
    "Francia",
    "Alemania",
    "Italia",
    "Reino Unido",
    "Irlanda",
    "Países Bajos",
    "Bélgica",
    "Suiza",
    "Austria",
    "Suecia",
    "Noruega",
    "Dinamarca",
    "Finlandia",
    "Polonia",
    "Grecia",
    "Turquía",
    "Rusia",
    "China",
    "Japón",
    "Corea del Sur",
    "India",
    "Australia",
    "Nueva Zelanda",
    "Sudáfrica",
    "Egipto",
    "Marruecos",
];

/// Ordered, read-only list of location names shown as suggestions.
///
/// Duplicates are kept as-is; order is insertion order.
#[derive(Debug, Clone)]
pub struct Catalog {
    names: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Cities first, then states, then countries.
    pub fn builtin() -> Self {
        let names = MEXICAN_CITIES
            .iter()
            .chain(MEXICAN_STATES)
            .chain(COUNTRIES)
            .map(|s| s.to_string())
            .collect();
        Self { names }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// One name per line; lines are trimmed and blank lines dropped.
    pub fn parse(text: &str) -> Self {
        Self::from_names(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty()),
        )
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        let catalog = Self::parse(&text);
        tracing::info!(path = %path.display(), entries = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
