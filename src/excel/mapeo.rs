/// Mapa que conserva el orden de inserción.
///
/// Se usa para agrupar filas del reporte: los cursos deben salir en el orden
/// en que aparecieron por primera vez, no ordenados por título ni código.
///
/// Estructura:
/// ```text
/// indices: k -> posición en `valores`
/// valores: [v0, v1, v2, ...]      (orden de primera aparición)
/// ```
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Clone, Debug)]
pub struct MapaOrdenado<K, V> {
    indices: HashMap<K, usize>,
    valores: Vec<V>,
}

impl<K: Hash + Eq, V> MapaOrdenado<K, V> {
    pub fn new() -> Self {
        MapaOrdenado {
            indices: HashMap::new(),
            valores: Vec::new(),
        }
    }

    /// Devuelve el valor de `clave`, creándolo con `crear` si es la primera vez.
    pub fn obtener_o_insertar_con<F: FnOnce() -> V>(&mut self, clave: K, crear: F) -> &mut V {
        let idx = match self.indices.get(&clave) {
            Some(&i) => i,
            None => {
                let i = self.valores.len();
                self.indices.insert(clave, i);
                self.valores.push(crear());
                i
            }
        };
        &mut self.valores[idx]
    }

    /// Consume el mapa y devuelve los valores en orden de inserción.
    pub fn into_values(self) -> Vec<V> {
        self.valores
    }
}

impl<K: Hash + Eq, V> Default for MapaOrdenado<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
