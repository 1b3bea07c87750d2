//! # 📈 maxima-core: Função parcial com máximos locais
//!
//! Armazena uma função parcial `A -> V` e mantém, a cada edição, o conjunto
//! dos pontos que são máximos locais: nenhum vizinho imediato (na ordem dos
//! argumentos) tem valor estritamente maior.
//!
//! ## Computational Complexity
//!
//! **Consultas, O(log n) comparações:**
//! - `value_at`, `find`, `contains`: busca binária no gráfico
//! - `iter`, `maxima`: O(1) para criar, O(1) por passo
//!
//! **Mutações, O(log n) comparações:**
//! - `set_value`, `erase`: uma busca no gráfico, no máximo quatro buscas nos
//!   máximos, três classificações
//! - Só o ponto alterado e os dois vizinhos podem mudar de classificação
//! - Movimentação de memória: O(n) no pior caso (índices são vetores
//!   ordenados), sem comparações extras
//!
//! ## Garantia forte
//!
//! Comparações de argumentos e valores são capacidades injetadas
//! ([`Order`]) que podem falhar. Cada mutação prepara um delta completo
//! antes de tocar no estado; se a preparação falhar (comparação, memória,
//! limite de pontos), o container fica exatamente como estava.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │         FunctionMaxima                          │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Gráfico: argumento crescente             │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Máximos: valor decrescente, arg cresc.   │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Updater: classifica → prepara → commit   │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use maxima_core::FunctionMaxima;
//!
//! let mut f = FunctionMaxima::new();
//! f.set_value(1, 10).unwrap();
//! f.set_value(2, 20).unwrap();
//! f.set_value(3, 10).unwrap();
//!
//! let best: Vec<_> = f.maxima().map(|p| (*p.arg(), *p.value())).collect();
//! assert_eq!(best, vec![(2, 20)]);
//!
//! f.set_value(3, 30).unwrap();
//! let best: Vec<_> = f.maxima().map(|p| (*p.arg(), *p.value())).collect();
//! assert_eq!(best, vec![(3, 30)]);
//! ```

pub mod classify;
pub mod config;
pub mod cursor;
pub mod error;
pub mod maxima;
pub mod order;
pub mod point;

mod relation;
mod transaction;
mod updater;

pub use classify::is_local_max;
pub use config::{MaximaConfig, ENV_MAX_POINTS, ENV_VERIFY_ON_COMMIT};
pub use cursor::{Cursor, Points};
pub use error::{BoxError, MaximaError, MaximaResult};
pub use maxima::FunctionMaxima;
pub use order::{FnOrder, NaturalOrder, Order};
pub use point::Point;
