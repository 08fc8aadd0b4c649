use platform_store::{
    DocumentStore,
    bson::{Document, doc},
};
use tracing::{debug, info, warn};

use crate::COLLECTION;

/// Demo directory entries inserted by [`seed_employees`].
pub fn sample_employees() -> Vec<Document> {
    vec![
        doc! {
            "firstName": "أمين",
            "lastName": "بن صالح",
            "full_name": "أمين بن صالح",
            "title": "مهندس نظم",
            "department": "IT",
            "email": "amine.bensaleh@example.com",
            "phone": "+213560000001",
            "office": "D3-201",
            "location": "Bab Ezzouar",
            "photoUrl": "https://i.pravatar.cc/150?img=1",
            "bio": "خبير في البنية التحتية والشبكات.",
            "tags": ["Linux", "Networking", "DevOps"],
            "isActive": true,
        },
        doc! {
            "firstName": "ليلى",
            "lastName": "قاسم",
            "full_name": "ليلى قاسم",
            "title": "موارد بشرية",
            "department": "HR",
            "email": "leila.kacem@example.com",
            "phone": "+213560000002",
            "office": "D3-105",
            "location": "Bab Ezzouar",
            "photoUrl": "https://i.pravatar.cc/150?img=5",
            "bio": "تطوير المواهب وثقافة المؤسسة.",
            "tags": ["Recruitment", "Culture"],
            "isActive": true,
        },
        doc! {
            "firstName": "مروان",
            "lastName": "شرقي",
            "full_name": "مروان شرقي",
            "title": "محاسب",
            "department": "Finance",
            "email": "marouane.cherki@example.com",
            "phone": "+213560000003",
            "office": "D3-009",
            "location": "Bab Ezzouar",
            "photoUrl": "https://i.pravatar.cc/150?img=8",
            "bio": "إدارة الميزانيات والتقارير.",
            "tags": ["Accounting", "Excel"],
            "isActive": true,
        },
    ]
}

/// Inserts [`sample_employees`] one by one. A failed insert is logged and
/// skipped; the return value counts the inserts that succeeded. Repeated
/// calls append further copies.
pub async fn seed_employees(store: &dyn DocumentStore) -> u64 {
    let mut inserted = 0;
    for (index, record) in sample_employees().into_iter().enumerate() {
        match store.insert_one(COLLECTION, record).await {
            Ok(id) => {
                debug!(index, %id, "sample employee inserted");
                inserted += 1;
            }
            Err(err) => warn!(index, error = %err, "sample employee insert failed"),
        }
    }
    info!(inserted, "seeded employee directory");
    inserted
}
