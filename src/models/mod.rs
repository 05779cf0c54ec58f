// ============================================================================
// MODELS - MODULE PRINCIPAL
// ============================================================================
//
// Description:
//   Point d'entrée pour tous les modèles de données.
//   Chaque modèle correspond à une table avec SeaORM.
//
// Liste des modules:
//   - bid_list : Offres (compte, type, quantités/prix)
//   - curve_point : Points de courbe (identifiant, date, terme, valeur)
//   - rating : Notations Moody's / S&P / Fitch
//   - rule_name : Règles (fragments JSON / SQL stockés tels quels)
//   - trade : Trades (achats/ventes)
//   - users : Comptes utilisateurs (hash du mot de passe jamais sérialisé)
//   - roles : Rôles (Admin, User)
//   - user_roles : Appartenance utilisateur <-> rôle
//   - dto : Data Transfer Objects pour les requêtes / réponses API
//
// Points d'attention:
//   - Aucune relation entre les cinq tables de référence
//   - Chaque table de référence porte une colonne row_version
//     (concurrence optimiste, voir db::context)
//   - Le JSON est en camelCase
//
// ============================================================================

pub mod bid_list;
pub mod curve_point;
pub mod rating;
pub mod rule_name;
pub mod trade;
pub mod users;
pub mod roles;
pub mod user_roles;
pub mod dto;
